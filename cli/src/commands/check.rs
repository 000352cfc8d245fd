//! `mesh check` - verify the on-disk unit matches a fresh generation

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::debug;

use meshstack_compose::{generate, SourceSet};

use super::generate::unit_path;

pub fn run(crate_dir: &str, out: Option<&str>) -> Result<()> {
    let root = Path::new(crate_dir);
    let set = SourceSet::load_crate_dir(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    let generation = generate(&set)?;

    let out_path = unit_path(root, out);
    debug!(
        "comparing {} against a fresh generation of {} byte(s)",
        out_path.display(),
        generation.unit.source.len()
    );
    let on_disk = match fs::read_to_string(&out_path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            bail!(
                "{} is missing; run `mesh gen` to create it",
                out_path.display()
            );
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", out_path.display()));
        }
    };

    if on_disk != generation.unit.source {
        bail!(
            "{} is stale; run `mesh gen` to refresh it",
            out_path.display()
        );
    }

    println!(
        "{} {} is up to date",
        "✓".green().bold(),
        out_path.display()
    );
    Ok(())
}
