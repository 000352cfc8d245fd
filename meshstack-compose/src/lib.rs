//! Topology scanning and composition codegen for MeshStack gateways
//!
//! This crate scans a MeshStack application's own source for declarative
//! topology registrations (`add_service::<T>`, `add_gateway::<G>`,
//! `with_subgraph`) and synthesizes the `compose` entry point that wires
//! the declared gateways to their services at runtime.
//!
//! The pipeline runs in four stages: the structural [`filter`] passes
//! possibly-relevant nodes, the [`resolve`] stage classifies them into
//! declaration records against a [`semantic`] oracle, [`aggregate`]
//! collapses the record set into a [`model::CompositionModel`], and
//! [`emit`] renders the generated unit. Filtering and resolution are pure
//! per-node functions; aggregation and emission recompute from the full
//! record set each pass, so the output is byte-stable for unchanged input.

pub mod aggregate;
pub mod emit;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod records;
pub mod resolve;
pub mod scan;
pub mod semantic;
pub mod suggest;
pub mod utils;
pub mod well_known;
pub mod writer;

pub use aggregate::aggregate;
pub use emit::{synthesize, GeneratedUnit, GENERATED_FILE_NAME};
pub use error::ComposeError;
pub use index::SemanticIndex;
pub use model::{CompositionModel, Gateway, GenerationResult, Subgraph};
pub use records::{AggregatorLink, Declaration, DeclarationSite, ServiceDeclaration};
pub use scan::{extract_declarations, SourceFile, SourceSet};
pub use semantic::{SemanticQuery, TypeSymbol};

/// One full pass: the aggregation result plus its rendered unit.
#[derive(Debug)]
pub struct Generation {
    pub result: GenerationResult,
    pub unit: GeneratedUnit,
}

/// Run the whole pipeline over a source set: build the semantic index,
/// extract declaration records, aggregate them, and synthesize the
/// generated unit.
pub fn generate(set: &SourceSet) -> Result<Generation, ComposeError> {
    let index = SemanticIndex::build(set);
    let records = extract_declarations(set, &index)?;
    let result = aggregate(&records);
    let unit = synthesize(&result);
    Ok(Generation { result, unit })
}
