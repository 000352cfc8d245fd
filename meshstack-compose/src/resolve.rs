//! Semantic resolution of filtered nodes into declaration records

use proc_macro2::Span;
use syn::{Expr, ExprMethodCall, Local, Pat};
use tracing::debug;

use crate::error::ComposeError;
use crate::filter::{single_type_argument, ScanNode};
use crate::records::{AggregatorLink, Declaration, DeclarationSite, ServiceDeclaration};
use crate::semantic::{SemanticQuery, TypeSymbol};
use crate::utils::{expr_to_string, type_to_string};
use crate::well_known;

/// Classify a relevant node as a declaration record, or reject it.
///
/// Rejections return `Ok(None)` and never abort a pass. The only error is
/// a link argument that cannot be unwound to a binding identifier; that is
/// an unanticipated shape and must fail loudly rather than silently drop
/// the link.
pub fn resolve(
    node: &ScanNode<'_>,
    semantics: &dyn SemanticQuery,
    file: &str,
) -> Result<Option<Declaration>, ComposeError> {
    match node {
        // Trait impls feed the semantic index, never records.
        ScanNode::TraitImpl(_) => Ok(None),
        ScanNode::Binding(local) => Ok(resolve_service(local, semantics, file).map(Declaration::Service)),
        ScanNode::MethodCall(call) => {
            if call.method == well_known::WITH_SUBGRAPH {
                Ok(resolve_link(call, semantics, file)?.map(Declaration::Link))
            } else {
                // Typed registration calls only matter as part of a chain;
                // the records are produced from the binding and link nodes.
                Ok(None)
            }
        }
    }
}

/// Resolve a `let` binding whose initializer declares a typed service.
fn resolve_service(
    local: &Local,
    semantics: &dyn SemanticQuery,
    file: &str,
) -> Option<ServiceDeclaration> {
    let registration = find_service_registration(local)?;
    let ty = single_type_argument(registration)?;

    let Some(symbol) = semantics.resolve_type(ty) else {
        debug!("unresolved service type `{}`; skipping", type_to_string(ty));
        return None;
    };
    if !implements_marker(semantics, &symbol) {
        debug!(
            "`{}` does not implement {}; skipping",
            symbol.qualified,
            well_known::SERVICE_METADATA
        );
        return None;
    }

    let ident = binding_ident(&local.pat)?;
    Some(ServiceDeclaration {
        type_name: symbol.name,
        qualified_type: symbol.qualified,
        binding: ident.to_string(),
        site: site_of(file, ident.span()),
    })
}

/// Resolve a `with_subgraph` call chained from a gateway declaration.
fn resolve_link(
    call: &ExprMethodCall,
    semantics: &dyn SemanticQuery,
    file: &str,
) -> Result<Option<AggregatorLink>, ComposeError> {
    if call.args.len() != 1 {
        return Ok(None);
    }

    // Walk the receiver spine inward for the gateway declaration. A typed
    // add_gateway whose type fails to resolve does not stop the walk.
    let mut gateway = None;
    let mut current: &Expr = &call.receiver;
    loop {
        match current {
            Expr::MethodCall(inner) => {
                if inner.method == well_known::ADD_GATEWAY {
                    if let Some(ty) = single_type_argument(inner) {
                        if let Some(symbol) = semantics.resolve_type(ty) {
                            gateway = Some((symbol, inner));
                            break;
                        }
                        debug!(
                            "unresolved gateway type `{}`; continuing chain walk",
                            type_to_string(ty)
                        );
                    }
                }
                current = &inner.receiver;
            }
            Expr::Field(field) => current = &field.base,
            _ => break,
        }
    }
    let Some((symbol, registration)) = gateway else {
        debug!("with_subgraph chain has no resolvable gateway declaration; skipping");
        return Ok(None);
    };

    let argument = &call.args[0];
    let binding = unwind_to_identifier(argument).ok_or_else(|| ComposeError::LinkRootNotFound {
        site: site_of(file, call.method.span()),
        argument: expr_to_string(argument),
    })?;

    Ok(Some(AggregatorLink {
        gateway_name: first_string_literal(registration).unwrap_or_else(|| symbol.name.clone()),
        gateway_type: symbol.qualified,
        binding,
        gateway_site: site_of(file, registration.method.span()),
        site: site_of(file, call.method.span()),
    }))
}

/// The typed `add_service` call on the initializer's receiver spine.
fn find_service_registration(local: &Local) -> Option<&ExprMethodCall> {
    let init = local.init.as_ref()?;
    let mut current: &Expr = &init.expr;
    loop {
        match current {
            Expr::MethodCall(call) => {
                if call.method == well_known::ADD_SERVICE && single_type_argument(call).is_some() {
                    return Some(call);
                }
                current = &call.receiver;
            }
            Expr::Field(field) => current = &field.base,
            _ => return None,
        }
    }
}

/// Unwind a link argument to its root identifier.
///
/// Walks through method calls, call expressions, field accesses, reference
/// and paren wrappers; a bare single-segment path is the terminal. Returns
/// `None` when the chain exhausts on anything else.
fn unwind_to_identifier(expr: &Expr) -> Option<String> {
    let mut current = expr;
    loop {
        match current {
            Expr::MethodCall(call) => current = &call.receiver,
            Expr::Call(call) => current = &call.func,
            Expr::Field(field) => current = &field.base,
            Expr::Reference(reference) => current = &reference.expr,
            Expr::Paren(paren) => current = &paren.expr,
            Expr::Path(path) => return path.path.get_ident().map(|ident| ident.to_string()),
            _ => return None,
        }
    }
}

fn implements_marker(semantics: &dyn SemanticQuery, symbol: &TypeSymbol) -> bool {
    semantics
        .capabilities_of(symbol)
        .iter()
        .any(|capability| capability.qualified == well_known::SERVICE_METADATA)
}

/// The variable name bound by a plain (possibly type-ascribed) identifier
/// pattern.
fn binding_ident(pat: &Pat) -> Option<&syn::Ident> {
    match pat {
        Pat::Ident(pat_ident) => Some(&pat_ident.ident),
        Pat::Type(pat_type) => match pat_type.pat.as_ref() {
            Pat::Ident(pat_ident) => Some(&pat_ident.ident),
            _ => None,
        },
        _ => None,
    }
}

fn first_string_literal(call: &ExprMethodCall) -> Option<String> {
    match call.args.first()? {
        Expr::Lit(lit) => match &lit.lit {
            syn::Lit::Str(s) => Some(s.value()),
            _ => None,
        },
        _ => None,
    }
}

fn site_of(file: &str, span: Span) -> DeclarationSite {
    let start = span.start();
    DeclarationSite::new(file, start.line, start.column)
}
