//! Deterministic rendering of the generated composition unit

use tracing::debug;

use crate::model::{CompositionModel, GenerationResult};
use crate::well_known;
use crate::writer::CodeWriter;

/// Logical name of the generated unit, fixed per pass.
pub const GENERATED_FILE_NAME: &str = "composition.g.rs";

const FILE_HEADER: &str = "// @generated by meshstack-compose. Do not edit by hand.\n";

/// Fixed output for the empty case, so the host build always has a valid
/// generated unit.
const NO_OP_COMPOSE: &str = "\
/// Composition entry point. No gateway topology was declared by this
/// crate, so composing is a no-op.
pub fn compose(app: ::meshstack::StackApp) -> ::meshstack::StackApp {
    app
}
";

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub file_name: &'static str,
    pub source: String,
}

/// Render the aggregation result. Identical input yields byte-identical
/// output; nothing here reads clocks, environment, or iteration order of
/// unordered collections.
pub fn synthesize(result: &GenerationResult) -> GeneratedUnit {
    let source = match result {
        GenerationResult::NoOp => {
            debug!("no topology; emitting the no-op unit");
            let mut writer = CodeWriter::new();
            writer.write(FILE_HEADER);
            writer.newline();
            writer.write(NO_OP_COMPOSE);
            writer.into_string()
        }
        GenerationResult::Composed(model) => {
            debug!("emitting {} gateway(s)", model.gateways.len());
            render_compose(model)
        }
    };
    GeneratedUnit {
        file_name: GENERATED_FILE_NAME,
        source,
    }
}

fn render_compose(model: &CompositionModel) -> String {
    let mut w = CodeWriter::new();
    w.write(FILE_HEADER);
    w.newline();
    w.write_indented_line("/// Composition entry point. Builds the declared gateway topology and");
    w.write_indented_line("/// hands it to the MeshStack composition runtime when the process is");
    w.write_indented_line("/// launched with the `compose` command.");
    w.write_indented_line(&format!(
        "pub fn compose(app: {0}) -> {0} {{",
        well_known::STACK_APP
    ));
    w.indent();
    w.write_indented_line("if let [command] = app.args() {");
    w.indent();
    w.write_indented_line(&format!(
        "if command == \"{}\" {{",
        well_known::COMPOSE_COMMAND
    ));
    w.indent();
    w.write_indented_line(&format!(
        "let mut gateways: Vec<{}> = Vec::new();",
        well_known::GATEWAY_INFO
    ));

    for gateway in &model.gateways {
        w.newline();
        w.write_indented_line(&format!(
            "gateways.push({}::create::<{}>(",
            well_known::GATEWAY_INFO,
            gateway.type_name
        ));
        w.indent();
        w.write_indented_line(&format!("{:?},", gateway.name));
        if gateway.subgraphs.is_empty() {
            w.write_indented_line("vec![],");
        } else {
            w.write_indented_line("vec![");
            w.indent();
            for subgraph in &gateway.subgraphs {
                w.write_indented_line(&format!(
                    "{}::create::<{}>({:?}, {:?}),",
                    well_known::SUBGRAPH_INFO,
                    subgraph.type_name,
                    subgraph.name,
                    subgraph.name
                ));
            }
            w.outdent();
            w.write_indented_line("],");
        }
        w.outdent();
        w.write_indented_line("));");
    }

    w.newline();
    w.write_indented_line(&format!("{}(gateways).wait();", well_known::CONFIGURE));
    w.outdent();
    w.write_indented_line("}");
    w.outdent();
    w.write_indented_line("}");
    w.newline();
    w.write_indented_line("app");
    w.outdent();
    w.write_indented_line("}");
    w.into_string()
}
