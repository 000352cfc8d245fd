//! `mesh gen` - scan a crate and write the generated composition unit

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use meshstack_compose::{generate, CompositionModel, GenerationResult, SourceSet, GENERATED_FILE_NAME};

const MANIFEST_DIR: &str = ".meshstack";
const MANIFEST_FILE: &str = "composition.manifest.json";

pub fn run(crate_dir: &str, out: Option<&str>, manifest: bool) -> Result<()> {
    let root = Path::new(crate_dir);
    let set = SourceSet::load_crate_dir(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    debug!(
        "scanned {} source file(s) under {}",
        set.files().len(),
        root.display()
    );
    let generation = generate(&set)?;

    let out_path = unit_path(root, out);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&out_path, &generation.unit.source)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    debug!(
        "wrote {} byte(s) to {}",
        generation.unit.source.len(),
        out_path.display()
    );

    match &generation.result {
        GenerationResult::Composed(model) => {
            let subgraphs: usize = model.gateways.iter().map(|g| g.subgraphs.len()).sum();
            println!(
                "{} Wrote {} ({} gateway(s), {} subgraph(s))",
                "✓".green().bold(),
                out_path.display(),
                model.gateways.len(),
                subgraphs
            );
            if manifest {
                let path = write_manifest(root, model)?;
                println!("{} Wrote {}", "✓".green().bold(), path.display());
            }
        }
        GenerationResult::NoOp => {
            println!(
                "{} No topology declared; wrote the no-op unit to {}",
                "→".blue().bold(),
                out_path.display()
            );
            if manifest {
                println!("{}", "No manifest written for an empty topology.".yellow());
            }
        }
    }

    Ok(())
}

/// The generated unit's on-disk location for a crate.
pub(crate) fn unit_path(root: &Path, out: Option<&str>) -> PathBuf {
    match out {
        Some(path) => PathBuf::from(path),
        None => root.join("src").join(GENERATED_FILE_NAME),
    }
}

fn write_manifest(root: &Path, model: &CompositionModel) -> Result<PathBuf> {
    let dir = root.join(MANIFEST_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(MANIFEST_FILE);
    let hashed = model.clone().with_content_hash();
    let json = serde_json::to_string_pretty(&hashed)?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
