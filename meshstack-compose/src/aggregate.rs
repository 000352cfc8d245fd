//! Aggregation of declaration records into the composition model

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::model::{CompositionModel, Gateway, GenerationResult, Subgraph};
use crate::records::{AggregatorLink, Declaration, DeclarationSite, ServiceDeclaration};
use crate::suggest::suggest_similar;

const SUGGEST_MAX_DISTANCE: usize = 3;

/// Collapse one pass's record set into a composition model.
///
/// Records are sorted by declaration site first; the incoming order carries
/// no meaning. Service bindings shadow like ordinary rebinding (last write
/// wins), gateway names deduplicate the other way around (first declaration
/// wins, later same-named declarations are dropped whole). The asymmetry is
/// deliberate.
pub fn aggregate(records: &[Declaration]) -> GenerationResult {
    let mut ordered: Vec<&Declaration> = records.iter().collect();
    ordered.sort_by(|a, b| a.site().cmp(b.site()));

    let mut bindings: BTreeMap<&str, &ServiceDeclaration> = BTreeMap::new();
    for record in &ordered {
        if let Declaration::Service(service) = record {
            if let Some(previous) = bindings.insert(service.binding.as_str(), service) {
                debug!(
                    "binding `{}` at {} shadows the declaration at {}",
                    service.binding, service.site, previous.site
                );
            }
        }
    }

    // One group per gateway declaration, ordered by its site.
    let mut groups: BTreeMap<&DeclarationSite, Vec<&AggregatorLink>> = BTreeMap::new();
    for record in &ordered {
        if let Declaration::Link(link) = record {
            groups.entry(&link.gateway_site).or_default().push(link);
        }
    }

    let mut processed: HashSet<&str> = HashSet::new();
    let mut gateways = Vec::new();
    for links in groups.values() {
        let Some(first) = links.first() else {
            continue;
        };
        if !processed.insert(first.gateway_name.as_str()) {
            debug!(
                "gateway `{}` redeclared at {}; dropping the later declaration",
                first.gateway_name, first.gateway_site
            );
            continue;
        }

        let mut gateway = Gateway {
            name: first.gateway_name.clone(),
            type_name: first.gateway_type.clone(),
            subgraphs: Vec::new(),
        };
        for link in links {
            match bindings.get(link.binding.as_str()) {
                Some(service) => gateway.subgraphs.push(Subgraph {
                    name: service.type_name.clone(),
                    type_name: service.qualified_type.clone(),
                }),
                None => {
                    let candidates: Vec<&str> = bindings.keys().copied().collect();
                    match suggest_similar(&link.binding, &candidates, SUGGEST_MAX_DISTANCE).first()
                    {
                        Some(suggestion) => debug!(
                            "{}: no service binding `{}`; did you mean `{}`?",
                            link.site, link.binding, suggestion.candidate
                        ),
                        None => debug!(
                            "{}: no service binding `{}`; link skipped",
                            link.site, link.binding
                        ),
                    }
                }
            }
        }
        gateways.push(gateway);
    }

    if gateways.is_empty() {
        debug!("no gateways declared; composing is a no-op");
        GenerationResult::NoOp
    } else {
        GenerationResult::Composed(CompositionModel::new(gateways))
    }
}
