//! Lightweight semantic index over the scanned forest
//!
//! Rust has no in-build compiler oracle to hand the resolver, so the index
//! reconstructs just enough of one from the parsed sources: type and trait
//! declarations qualified from the crate root, `use` aliases for resolving
//! references, and trait-impl edges with their supertrait closure. Types
//! declared outside the scanned sources stay unresolvable, which makes the
//! resolver reject records that depend on them.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::debug;

use crate::scan::{SourceFile, SourceSet};
use crate::semantic::{SemanticQuery, TypeSymbol};
use crate::utils::path_to_string;

/// Default `SemanticQuery` implementation, built once per pass and
/// immutable afterwards.
pub struct SemanticIndex {
    /// Simple name -> qualified paths of declared structs and enums.
    types: BTreeMap<String, Vec<String>>,
    /// Trait qualified path -> resolved supertrait paths.
    supertraits: BTreeMap<String, Vec<String>>,
    /// Type qualified path -> directly implemented trait paths.
    impls: BTreeMap<String, BTreeSet<String>>,
}

impl SemanticIndex {
    pub fn build(set: &SourceSet) -> Self {
        let mut builder = Builder::default();
        for (file_index, file) in set.files().iter().enumerate() {
            builder.collect_file(file_index, file);
        }
        let index = builder.finish();
        debug!(
            "indexed {} type names, {} traits, {} impl targets",
            index.types.len(),
            index.supertraits.len(),
            index.impls.len()
        );
        index
    }
}

impl SemanticQuery for SemanticIndex {
    fn resolve_type(&self, ty: &syn::Type) -> Option<TypeSymbol> {
        let syn::Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() || type_path.path.leading_colon.is_some() {
            return None;
        }
        let segments: Vec<String> = type_path
            .path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        let (written, crate_rooted): (&[String], bool) = match segments.split_first() {
            Some((first, rest)) if first == "crate" => (rest, true),
            _ => (&segments[..], false),
        };
        let simple = written.last()?;
        let candidates = self.types.get(simple)?;
        let matched: Vec<&String> = candidates
            .iter()
            .filter(|qualified| {
                if crate_rooted {
                    **qualified == format!("crate::{}", written.join("::"))
                } else {
                    matches_written(qualified, written)
                }
            })
            .collect();
        match matched.as_slice() {
            [qualified] => Some(TypeSymbol::new(simple, (*qualified).clone())),
            [] => None,
            _ => {
                debug!("ambiguous type reference `{}`", written.join("::"));
                None
            }
        }
    }

    fn capabilities_of(&self, symbol: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut queue: VecDeque<String> = self
            .impls
            .get(&symbol.qualified)
            .map(|direct| direct.iter().cloned().collect())
            .unwrap_or_default();
        while let Some(path) = queue.pop_front() {
            if seen.insert(path.clone()) {
                if let Some(supers) = self.supertraits.get(&path) {
                    queue.extend(supers.iter().cloned());
                }
            }
        }
        seen.into_iter().map(TypeSymbol::from_qualified).collect()
    }
}

/// Whether the trailing segments of `qualified` equal the written path.
fn matches_written(qualified: &str, written: &[String]) -> bool {
    let parts: Vec<&str> = qualified.split("::").collect();
    if written.len() > parts.len() {
        return false;
    }
    parts[parts.len() - written.len()..]
        .iter()
        .zip(written)
        .all(|(part, segment)| *part == segment.as_str())
}

fn qualify(module: &[String], name: &str) -> String {
    if module.is_empty() {
        format!("crate::{}", name)
    } else {
        format!("crate::{}::{}", module.join("::"), name)
    }
}

struct PendingTrait {
    qualified: String,
    module: Vec<String>,
    file: usize,
    bounds: Vec<syn::Path>,
}

struct PendingImpl {
    module: Vec<String>,
    file: usize,
    self_path: syn::Path,
    trait_path: syn::Path,
}

/// Two-phase construction: collect declarations first, then resolve trait
/// bounds and impl edges against the full declaration table.
#[derive(Default)]
struct Builder {
    declared: BTreeSet<String>,
    types: BTreeMap<String, Vec<String>>,
    traits_by_simple: BTreeMap<String, Vec<String>>,
    pending_traits: Vec<PendingTrait>,
    pending_impls: Vec<PendingImpl>,
    file_uses: Vec<BTreeMap<String, String>>,
}

impl Builder {
    fn collect_file(&mut self, file_index: usize, file: &SourceFile) {
        let mut uses = BTreeMap::new();
        let mut module = file.module_path.clone();
        self.collect_items(&file.ast.items, &mut module, &mut uses, file_index);
        self.file_uses.push(uses);
    }

    fn collect_items(
        &mut self,
        items: &[syn::Item],
        module: &mut Vec<String>,
        uses: &mut BTreeMap<String, String>,
        file_index: usize,
    ) {
        for item in items {
            match item {
                syn::Item::Use(item_use) => {
                    flatten_use(&item_use.tree, &mut Vec::new(), uses);
                }
                syn::Item::Struct(item_struct) => self.declare_type(module, &item_struct.ident),
                syn::Item::Enum(item_enum) => self.declare_type(module, &item_enum.ident),
                syn::Item::Trait(item_trait) => {
                    let qualified = qualify(module, &item_trait.ident.to_string());
                    self.declared.insert(qualified.clone());
                    self.traits_by_simple
                        .entry(item_trait.ident.to_string())
                        .or_default()
                        .push(qualified.clone());
                    let bounds = item_trait
                        .supertraits
                        .iter()
                        .filter_map(|bound| match bound {
                            syn::TypeParamBound::Trait(trait_bound) => {
                                Some(trait_bound.path.clone())
                            }
                            _ => None,
                        })
                        .collect();
                    self.pending_traits.push(PendingTrait {
                        qualified,
                        module: module.clone(),
                        file: file_index,
                        bounds,
                    });
                }
                syn::Item::Impl(item_impl) => {
                    // Generic impls are outside the declarable surface.
                    if !item_impl.generics.params.is_empty() {
                        continue;
                    }
                    let Some((_, trait_path, _)) = &item_impl.trait_ else {
                        continue;
                    };
                    let syn::Type::Path(self_path) = item_impl.self_ty.as_ref() else {
                        continue;
                    };
                    if self_path.qself.is_some() {
                        continue;
                    }
                    self.pending_impls.push(PendingImpl {
                        module: module.clone(),
                        file: file_index,
                        self_path: self_path.path.clone(),
                        trait_path: trait_path.clone(),
                    });
                }
                syn::Item::Mod(item_mod) => {
                    if let Some((_, nested)) = &item_mod.content {
                        module.push(item_mod.ident.to_string());
                        self.collect_items(nested, module, uses, file_index);
                        module.pop();
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_type(&mut self, module: &[String], ident: &syn::Ident) {
        let qualified = qualify(module, &ident.to_string());
        self.declared.insert(qualified.clone());
        self.types
            .entry(ident.to_string())
            .or_default()
            .push(qualified);
    }

    /// Qualify a path reference as written in `module` of file `file`:
    /// crate-rooted and explicitly external paths pass through; otherwise
    /// try the same module, the file's `use` aliases, then a unique
    /// crate-wide declaration; unresolved references keep their text.
    fn resolve_reference(&self, path: &syn::Path, module: &[String], file: usize) -> String {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        let text = path_to_string(path);
        if path.leading_colon.is_some() {
            return text;
        }
        if segments.first().is_some_and(|first| first == "crate") {
            return text;
        }
        let uses = &self.file_uses[file];
        if let [name] = segments.as_slice() {
            let local = qualify(module, name);
            if self.declared.contains(&local) {
                return local;
            }
            if let Some(full) = uses.get(name) {
                return full.clone();
            }
            let mut candidates: Vec<&String> = Vec::new();
            if let Some(types) = self.types.get(name) {
                candidates.extend(types);
            }
            if let Some(traits) = self.traits_by_simple.get(name) {
                candidates.extend(traits);
            }
            if let [unique] = candidates.as_slice() {
                return (*unique).clone();
            }
            return text;
        }
        if let Some(full) = uses.get(&segments[0]) {
            return format!("{}::{}", full, segments[1..].join("::"));
        }
        let local = qualify(module, &text);
        if self.declared.contains(&local) {
            return local;
        }
        let rooted = format!("crate::{}", text);
        if self.declared.contains(&rooted) {
            return rooted;
        }
        text
    }

    fn finish(self) -> SemanticIndex {
        let mut supertraits: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for pending in &self.pending_traits {
            let resolved = pending
                .bounds
                .iter()
                .map(|bound| self.resolve_reference(bound, &pending.module, pending.file))
                .collect();
            supertraits.insert(pending.qualified.clone(), resolved);
        }

        let mut impls: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for pending in &self.pending_impls {
            let target = self.resolve_reference(&pending.self_path, &pending.module, pending.file);
            let capability =
                self.resolve_reference(&pending.trait_path, &pending.module, pending.file);
            impls.entry(target).or_default().insert(capability);
        }

        SemanticIndex {
            types: self.types,
            supertraits,
            impls,
        }
    }
}

fn flatten_use(tree: &syn::UseTree, prefix: &mut Vec<String>, uses: &mut BTreeMap<String, String>) {
    match tree {
        syn::UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            flatten_use(&path.tree, prefix, uses);
            prefix.pop();
        }
        syn::UseTree::Name(name) => {
            let mut full = prefix.clone();
            full.push(name.ident.to_string());
            uses.insert(name.ident.to_string(), full.join("::"));
        }
        syn::UseTree::Rename(rename) => {
            let mut full = prefix.clone();
            full.push(rename.ident.to_string());
            uses.insert(rename.rename.to_string(), full.join("::"));
        }
        syn::UseTree::Glob(_) => {}
        syn::UseTree::Group(group) => {
            for item in &group.items {
                flatten_use(item, prefix, uses);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well_known;

    fn index_of(files: &[(&str, &str)]) -> SemanticIndex {
        let mut set = SourceSet::new();
        for (path, source) in files {
            set.add_source(*path, source).unwrap();
        }
        SemanticIndex::build(&set)
    }

    fn ty(src: &str) -> syn::Type {
        syn::parse_str(src).unwrap()
    }

    #[test]
    fn test_resolves_type_across_modules() {
        let index = index_of(&[
            ("src/main.rs", "fn main() {}"),
            ("src/services.rs", "pub struct AccountsService;"),
        ]);
        let symbol = index.resolve_type(&ty("AccountsService")).unwrap();
        assert_eq!(symbol.name, "AccountsService");
        assert_eq!(symbol.qualified, "crate::services::AccountsService");
    }

    #[test]
    fn test_ambiguous_simple_name_requires_written_segments() {
        let index = index_of(&[
            ("src/a.rs", "pub struct Widget;"),
            ("src/b.rs", "pub struct Widget;"),
        ]);
        assert!(index.resolve_type(&ty("Widget")).is_none());

        let symbol = index.resolve_type(&ty("a::Widget")).unwrap();
        assert_eq!(symbol.qualified, "crate::a::Widget");
    }

    #[test]
    fn test_crate_rooted_reference() {
        let index = index_of(&[("src/lib.rs", "pub mod inner { pub enum Mode { On } }")]);
        let symbol = index.resolve_type(&ty("crate::inner::Mode")).unwrap();
        assert_eq!(symbol.qualified, "crate::inner::Mode");
        assert!(index.resolve_type(&ty("crate::Mode")).is_none());
    }

    #[test]
    fn test_marker_through_use_alias() {
        let index = index_of(&[(
            "src/main.rs",
            r#"
            use meshstack::ServiceMetadata;
            pub struct AccountsService;
            impl ServiceMetadata for AccountsService {}
            "#,
        )]);
        let symbol = index.resolve_type(&ty("AccountsService")).unwrap();
        let capabilities = index.capabilities_of(&symbol);
        assert!(capabilities
            .iter()
            .any(|c| c.qualified == well_known::SERVICE_METADATA));
    }

    #[test]
    fn test_marker_through_supertrait_closure() {
        let index = index_of(&[(
            "src/main.rs",
            r#"
            pub trait EdgeCapable: meshstack::ServiceMetadata {}
            pub struct BillingService;
            impl EdgeCapable for BillingService {}
            "#,
        )]);
        let symbol = index.resolve_type(&ty("BillingService")).unwrap();
        let capabilities = index.capabilities_of(&symbol);
        let paths: Vec<&str> = capabilities.iter().map(|c| c.qualified.as_str()).collect();
        assert!(paths.contains(&"crate::EdgeCapable"));
        assert!(paths.contains(&well_known::SERVICE_METADATA));
    }

    #[test]
    fn test_unknown_type_is_unresolved() {
        let index = index_of(&[("src/main.rs", "fn main() {}")]);
        assert!(index.resolve_type(&ty("Mystery")).is_none());
    }

    #[test]
    fn test_capabilities_are_deterministically_ordered() {
        let index = index_of(&[(
            "src/main.rs",
            r#"
            pub struct S;
            impl zeta::Z for S {}
            impl alpha::A for S {}
            "#,
        )]);
        let symbol = index.resolve_type(&ty("S")).unwrap();
        let paths: Vec<String> = index
            .capabilities_of(&symbol)
            .into_iter()
            .map(|c| c.qualified)
            .collect();
        assert_eq!(paths, vec!["alpha::A".to_string(), "zeta::Z".to_string()]);
    }
}
