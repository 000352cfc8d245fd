//! Parsed source forest and the per-pass extraction driver

use std::fs;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use tracing::{debug, warn};

use crate::error::ComposeError;
use crate::filter::{is_relevant, ScanNode};
use crate::records::Declaration;
use crate::resolve::resolve;
use crate::semantic::SemanticQuery;

/// One parsed source file with its inferred module path.
#[derive(Debug)]
pub struct SourceFile {
    /// Display path, `/`-separated, rooted at the crate dir (`src/...`).
    pub path: String,
    /// Module segments the file contributes (`src/lib.rs` = root = empty,
    /// `src/topology.rs` = `["topology"]`, `src/a/mod.rs` = `["a"]`).
    pub module_path: Vec<String>,
    pub ast: syn::File,
}

/// The ordered forest of parsed files for one pass.
#[derive(Debug, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` and add it under `path`. Strict: parse failures are
    /// returned to the caller.
    pub fn add_source(
        &mut self,
        path: impl Into<String>,
        source: &str,
    ) -> Result<(), ComposeError> {
        let path = path.into();
        let ast = syn::parse_file(source).map_err(|err| ComposeError::Parse {
            path: path.clone(),
            message: err.to_string(),
        })?;
        let module_path = module_path_for(&path);
        self.files.push(SourceFile {
            path,
            module_path,
            ast,
        });
        Ok(())
    }

    /// Load every `.rs` file under `root/src`, sorted by path.
    ///
    /// Files that fail to parse are skipped with a warning so a half-written
    /// source tree cannot fail the build; I/O failures are real errors.
    /// Previously generated units (`*.g.rs`) are not scanned.
    pub fn load_crate_dir(root: &Path) -> Result<Self, ComposeError> {
        let src = root.join("src");
        let mut paths = Vec::new();
        collect_rust_files(&src, &mut paths)?;
        paths.sort();

        let mut set = SourceSet::new();
        for path in paths {
            let rel = display_path(root, &path);
            if rel.ends_with(".g.rs") {
                debug!("not scanning generated unit {}", rel);
                continue;
            }
            let source = fs::read_to_string(&path).map_err(|err| ComposeError::Io {
                path: rel.clone(),
                source: err,
            })?;
            if let Err(err) = set.add_source(rel.clone(), &source) {
                warn!("skipping {}: {}", rel, err);
            }
        }
        Ok(set)
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Run the structural filter and the resolver over every candidate node in
/// the set, in file order.
///
/// Record order is whatever the walk produced; aggregation re-sorts by
/// declaration site and must not depend on it.
pub fn extract_declarations(
    set: &SourceSet,
    semantics: &dyn SemanticQuery,
) -> Result<Vec<Declaration>, ComposeError> {
    let mut records = Vec::new();
    for file in set.files() {
        let mut collector = Collector {
            semantics,
            file: &file.path,
            records: &mut records,
            defect: None,
        };
        collector.visit_file(&file.ast);
        if let Some(defect) = collector.defect {
            return Err(defect);
        }
    }
    debug!(
        "extracted {} declaration records from {} files",
        records.len(),
        set.files().len()
    );
    Ok(records)
}

struct Collector<'a> {
    semantics: &'a dyn SemanticQuery,
    file: &'a str,
    records: &'a mut Vec<Declaration>,
    defect: Option<ComposeError>,
}

impl Collector<'_> {
    fn consider(&mut self, node: ScanNode<'_>) {
        if self.defect.is_some() {
            return;
        }
        if !is_relevant(&node) {
            return;
        }
        match resolve(&node, self.semantics, self.file) {
            Ok(Some(record)) => self.records.push(record),
            Ok(None) => {}
            Err(err) => self.defect = Some(err),
        }
    }
}

impl<'ast> Visit<'ast> for Collector<'_> {
    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        self.consider(ScanNode::TraitImpl(node));
        syn::visit::visit_item_impl(self, node);
    }

    fn visit_local(&mut self, node: &'ast syn::Local) {
        self.consider(ScanNode::Binding(node));
        syn::visit::visit_local(self, node);
    }

    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        self.consider(ScanNode::MethodCall(node));
        syn::visit::visit_expr_method_call(self, node);
    }
}

fn collect_rust_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ComposeError> {
    let entries = fs::read_dir(dir).map_err(|err| ComposeError::Io {
        path: dir.display().to_string(),
        source: err,
    })?;
    for entry in entries {
        let entry = entry.map_err(|err| ComposeError::Io {
            path: dir.display().to_string(),
            source: err,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_rust_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    Ok(())
}

fn display_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.display().to_string().replace('\\', "/")
}

/// Infer the module segments a file contributes from its path.
fn module_path_for(path: &str) -> Vec<String> {
    let normalized = path.replace('\\', "/");
    let mut parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();
    if let Some(pos) = parts.iter().position(|p| *p == "src") {
        parts.drain(..=pos);
    }
    let Some(last) = parts.pop() else {
        return Vec::new();
    };
    let stem = last.strip_suffix(".rs").unwrap_or(last);
    let mut module: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
    match stem {
        "main" | "lib" | "mod" => {}
        _ => module.push(stem.to_string()),
    }
    module
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_path_inference() {
        assert!(module_path_for("src/main.rs").is_empty());
        assert!(module_path_for("src/lib.rs").is_empty());
        assert_eq!(module_path_for("src/topology.rs"), vec!["topology"]);
        assert_eq!(module_path_for("src/services/mod.rs"), vec!["services"]);
        assert_eq!(
            module_path_for("src/services/accounts.rs"),
            vec!["services", "accounts"]
        );
    }

    #[test]
    fn test_add_source_rejects_invalid_syntax() {
        let mut set = SourceSet::new();
        let err = set.add_source("src/bad.rs", "fn broken( {").unwrap_err();
        assert!(matches!(err, ComposeError::Parse { .. }));
        assert!(set.is_empty());
    }

    #[test]
    fn test_load_crate_dir_sorts_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("services")).unwrap();
        fs::write(src.join("main.rs"), "fn main() {}\n").unwrap();
        fs::write(src.join("services/mod.rs"), "pub struct A;\n").unwrap();
        fs::write(src.join("broken.rs"), "fn broken( {\n").unwrap();
        fs::write(src.join("composition.g.rs"), "pub fn compose() {}\n").unwrap();
        fs::write(src.join("notes.txt"), "not rust\n").unwrap();

        let set = SourceSet::load_crate_dir(dir.path()).unwrap();
        let paths: Vec<&str> = set.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/main.rs", "src/services/mod.rs"]);
    }

    #[test]
    fn test_load_crate_dir_missing_src_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceSet::load_crate_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ComposeError::Io { .. }));
    }
}
