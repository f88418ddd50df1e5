use indexmap::IndexMap;

use crate::display_width::node_width;
use crate::label::{LINE_BREAK, to_label};
use crate::model::{
    CLUSTERS_SECTION, HOSTS_SECTION, InfraGraph, Net, NetStyle, Node, ground_base, ground_id,
    group_id, strip_section_tag,
};

const GROUND_PALETTE: [&str; 5] = ["#364895", "#cd6900", "#4444ff", "#a52a2a", "#a90053"];
const GROUND_EDGE_ALPHA: &str = "a0";
const GROUP_EDGE_COLOR: &str = "#bbaaddb0";
const AZURE_HOST_COLOR: &str = "lightblue";
const HOST_COLOR: &str = "#ffa6bb";
const INDENT: &str = "    ";

struct DotWriter {
    out: String,
}

impl DotWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

/// Serializes the graph as a Graphviz `digraph`.
pub fn render(graph: &InfraGraph) -> String {
    let mut w = DotWriter::new();

    w.line(0, "digraph G {");
    w.line(1, "fontname=\"Arial\"");
    w.line(
        1,
        "node [shape=box, style=filled, fontname=\"Arial\", fontcolor=black, fillcolor=palegreen]",
    );
    w.line(1, "edge [dir=none]");
    w.blank();

    render_ground_refs(&mut w, graph);
    render_databases(&mut w, graph);
    render_web_services(&mut w, graph);

    let groups = group_counts(&graph.nets);
    render_groups(&mut w, &groups);
    render_clusters(&mut w, graph);
    render_hosts(&mut w, graph);
    render_nets(&mut w, graph);

    w.line(0, "}");
    w.out
}

fn ground_color(index: usize) -> &'static str {
    GROUND_PALETTE[index % GROUND_PALETTE.len()]
}

fn render_ground_refs(w: &mut DotWriter, graph: &InfraGraph) {
    w.line(1, "// Ground references");
    w.line(
        1,
        "{ node [shape=parallelogram, fixedsize=true, height=0.3, fontcolor=white]",
    );
    for (index, name) in graph.ground_refs.names().enumerate() {
        let color = ground_color(index);
        w.line(
            2,
            &format!(
                "{{ node [label=\"{name}\", width={:.2}, color=\"{color}\", fillcolor=\"{color}\"]",
                node_width(name)
            ),
        );
        let instances: Vec<String> = (1..graph.ground_refs.next_counter(name))
            .map(|i| ground_id(name, i))
            .collect();
        w.line(3, &instances.join(" "));
        w.line(2, "}");
    }
    w.line(1, "}");
}

fn render_databases(w: &mut DotWriter, graph: &InfraGraph) {
    if graph.database_nodes.is_empty() {
        return;
    }
    w.line(1, "// Databases");
    w.line(1, "{ node [shape=cylinder, fillcolor=\"#CDE8F6\"]");
    for node in graph.database_nodes.iter().filter_map(|id| graph.node(id)) {
        w.line(
            2,
            &format!("{} [label=<{LINE_BREAK}{}>]", node.id, node.label),
        );
    }
    w.line(1, "}");
}

fn render_web_services(w: &mut DotWriter, graph: &InfraGraph) {
    if graph.web_nodes.is_empty() {
        return;
    }
    w.line(1, "// Web visible services");
    w.line(1, "{ node [fillcolor=\"#00ffcc\"]");
    for node in graph.web_nodes.iter().filter_map(|id| graph.node(id)) {
        w.line(
            2,
            &format!("{} [label=<{}{LINE_BREAK}(https)>]", node.id, node.label),
        );
    }
    w.line(1, "}");
}

/// Number of nets per group name, in first-seen order.
fn group_counts(nets: &[Net]) -> IndexMap<&str, usize> {
    let mut counts = IndexMap::new();
    for name in nets.iter().filter_map(|n| n.name.as_deref()) {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

fn render_groups(w: &mut DotWriter, groups: &IndexMap<&str, usize>) {
    w.line(1, "// VPN nodes");
    w.line(
        1,
        "{ node [shape=cds, fixedsize=true, width=0.9, height=0.7, fillcolor=\"#ddccff\", color=\"#732375\"]",
    );
    for (name, count) in groups {
        let instances: Vec<String> = (1..=*count).map(|i| group_id(name, i)).collect();
        w.line(
            2,
            &format!(
                "{{ node [label=<{name}{LINE_BREAK}VPN>] {} }}",
                instances.join(" ")
            ),
        );
    }
    w.line(1, "}");
}

/// `id`, or `id [label=<...>]` when the label differs from the id.
fn node_stmt(node: &Node) -> String {
    if node.needs_label() {
        format!("{} [label=<{}>]", node.id, node.label)
    } else {
        node.id.clone()
    }
}

fn render_members(w: &mut DotWriter, graph: &InfraGraph, node: &Node) {
    for child in graph.children_of(node) {
        w.line(2, &node_stmt(child));
    }
}

fn render_clusters(w: &mut DotWriter, graph: &InfraGraph) {
    w.line(1, "// Clusters (groups of devices)");
    let mut empty = Vec::new();
    for node in graph.nodes_under(CLUSTERS_SECTION) {
        if !node.has_children() {
            empty.push(node);
            continue;
        }
        let title = to_label(strip_section_tag(&node.id));
        w.line(1, &format!("subgraph cluster_{} {{", node.id));
        w.line(
            2,
            &format!("style=filled; color=\"lightgray\"; label=<<b>{title}</b>>; fontsize=18"),
        );
        render_members(w, graph, node);
        w.line(1, "}");
    }

    if empty.is_empty() {
        return;
    }
    w.line(1, "// Empty clusters (nodes drawn like clusters)");
    w.line(1, "{ node [fontsize=18, fillcolor=lightgray, color=lightgray]");
    for node in empty {
        w.line(
            2,
            &format!(
                "{} [label=<<b>{}</b>{LINE_BREAK}{LINE_BREAK} . >]",
                strip_section_tag(&node.id),
                node.label
            ),
        );
    }
    w.line(1, "}");
}

fn host_color(host: &str) -> &'static str {
    if host.to_lowercase().replace('-', "").contains("azure") {
        AZURE_HOST_COLOR
    } else {
        HOST_COLOR
    }
}

fn render_hosts(w: &mut DotWriter, graph: &InfraGraph) {
    w.line(1, "// Hosts/Devices/Servers/HW offering services");
    let mut found = false;
    for node in graph.nodes_under(HOSTS_SECTION) {
        found = true;
        let host = strip_section_tag(&node.id);
        w.line(1, &format!("subgraph cluster_{} {{", node.id));
        w.line(
            2,
            &format!(
                "style=filled; color=\"{}\"; label=<<b>{}</b>>",
                host_color(host),
                to_label(host)
            ),
        );
        render_members(w, graph, node);
        w.line(1, "}");
    }
    if found {
        w.line(1, "// end of hosts");
    }
    w.blank();
}

/// Palette colour of the first ground-reference endpoint of `net`, if any.
fn ground_edge_color(graph: &InfraGraph, net: &Net) -> Option<&'static str> {
    [net.left.as_str(), net.right.as_str()]
        .into_iter()
        .find_map(|id| {
            let base = ground_base(id)?;
            graph.ground_refs.index_of(base).map(ground_color)
        })
}

fn edge_attrs(mut attrs: Vec<String>, style: NetStyle) -> String {
    if style == NetStyle::Dashed {
        attrs.push("style=dashed".to_string());
    }
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" [{}]", attrs.join(", "))
    }
}

fn render_nets(w: &mut DotWriter, graph: &InfraGraph) {
    w.line(1, "// Nets (connections)");
    w.line(1, "{ edge [color=\"#00000080\", penwidth=2.0]");

    let mut next_instance: IndexMap<&str, usize> = IndexMap::new();
    for net in &graph.nets {
        match net.name.as_deref() {
            Some(name) => {
                let counter = next_instance.entry(name).or_insert(1);
                let via = group_id(name, *counter);
                *counter += 1;
                let attrs = edge_attrs(
                    vec![
                        format!("color=\"{GROUP_EDGE_COLOR}\""),
                        "penwidth=4.0".to_string(),
                    ],
                    net.style,
                );
                w.line(2, &format!("{} -> {via}{attrs}", net.left));
                w.line(2, &format!("{via} -> {}{attrs}", net.right));
            }
            None => {
                let attrs = match ground_edge_color(graph, net) {
                    Some(color) => vec![
                        format!("color=\"{color}{GROUND_EDGE_ALPHA}\""),
                        "penwidth=2.0".to_string(),
                    ],
                    None => Vec::new(),
                };
                w.line(
                    2,
                    &format!("{} -> {}{}", net.left, net.right, edge_attrs(attrs, net.style)),
                );
            }
        }
    }

    w.line(1, "}");
}
