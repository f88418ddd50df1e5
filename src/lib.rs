pub mod display_width;
pub mod dot_renderer;
pub mod error;
pub mod hierarchy;
pub mod label;
pub mod model;
pub mod net_parser;
pub mod node_parser;
pub mod preprocess;

use std::path::Path;

use tracing::debug;

pub use error::{Error, Result};
pub use model::{InfraGraph, Net, NetStyle, Node};

/// Runs every build phase over `input` and returns the finished model.
/// Lines that do not parse are skipped.
pub fn build_graph(input: &str) -> InfraGraph {
    let mut graph = InfraGraph::new();
    let source = preprocess::preprocess(input, &mut graph.ground_refs);
    hierarchy::build_hierarchy(&mut graph, source.node_lines.iter().map(String::as_str));
    net_parser::extract_nets(&mut graph, source.net_lines.iter().map(String::as_str));
    debug!(
        nodes = graph.nodes.len(),
        nets = graph.nets.len(),
        "graph built"
    );
    graph
}

pub fn render(input: &str) -> String {
    dot_renderer::render(&build_graph(input))
}

/// Converts the file at `input` and writes the DOT document to `output`.
/// The output file is only touched once the whole document is rendered.
pub fn convert_file(input: &Path, output: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input).map_err(|source| Error::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    let dot = render(&text);
    std::fs::write(output, dot).map_err(|source| Error::WriteOutput {
        path: output.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_graph_fills_every_part() {
        let graph = build_graph(
            "Hosts\n  vm1\n    svc1\nDatabases\n  db1\nConnections\n  svc1 -- db1\n  /gnd/ -- svc1\n",
        );
        assert_eq!(graph.node("Host_vm1").unwrap().children, vec!["svc1"]);
        assert_eq!(graph.database_nodes, vec!["db1"]);
        assert_eq!(graph.nets.len(), 2);
        assert_eq!(graph.nets[1].left, "xg_gnd_1");
        assert_eq!(graph.ground_refs.names().collect::<Vec<_>>(), vec!["gnd"]);
    }

    #[test]
    fn connection_lines_never_become_nodes() {
        let graph = build_graph("Connections\n  a -- b\n");
        assert!(graph.nodes.is_empty());
        assert_eq!(graph.nets.len(), 1);
    }

    #[test]
    fn render_empty_input() {
        let output = render("");
        assert!(output.starts_with("digraph G {"));
        assert!(output.trim_end().ends_with('}'));
    }

    #[test]
    fn malformed_input_still_renders() {
        let output = render("Connections\n  ??? \n  a ==> b\n");
        assert!(!output.contains("->"));
    }
}
