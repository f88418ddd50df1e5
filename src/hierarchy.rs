use tracing::{debug, trace};

use crate::label::to_label;
use crate::model::{
    DATABASES_SECTION, InfraGraph, WEB_SERVICES_SECTION, is_tagged_section, tagged_id,
};
use crate::node_parser::{decode_attributes, extract_tokens};

/// Maps leading-whitespace widths to tree depths. Each deeper line opens one
/// level; a shallower line closes the levels wider than itself.
#[derive(Debug)]
struct IndentStack {
    widths: Vec<usize>,
}

impl IndentStack {
    fn new() -> Self {
        Self { widths: vec![0] }
    }

    fn top(&self) -> usize {
        self.widths.last().copied().unwrap_or(0)
    }

    fn depth_for(&mut self, leading: usize) -> usize {
        let mut closed = false;
        while self.widths.len() > 1 && leading < self.top() {
            self.widths.pop();
            closed = true;
        }
        if leading > self.top() {
            let nested = self.widths.len() > 1;
            match self.widths.last_mut() {
                // landed between two open levels: sibling of the level above
                Some(top) if closed && nested => *top = leading,
                _ => self.widths.push(leading),
            }
        }
        self.widths.len() - 1
    }
}

/// Builds the node forest from the node-definition lines.
pub struct HierarchyBuilder<'g> {
    graph: &'g mut InfraGraph,
    indents: IndentStack,
    /// Open ancestors with the depth each was declared at.
    ancestors: Vec<(String, usize)>,
    section: Option<String>,
}

impl<'g> HierarchyBuilder<'g> {
    pub fn new(graph: &'g mut InfraGraph) -> Self {
        Self {
            graph,
            indents: IndentStack::new(),
            ancestors: Vec::new(),
            section: None,
        }
    }

    pub fn feed<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            self.line(line);
        }
    }

    pub fn line(&mut self, line: &str) {
        let tokens = extract_tokens(line);
        if tokens.is_empty() {
            return;
        }

        let leading = line.len() - line.trim_start().len();
        let depth = self.indents.depth_for(leading);

        for (i, token) in tokens.iter().enumerate() {
            let opens_section = depth == 0 && i == 0;
            if opens_section {
                debug!(section = token.id, "begin section");
                self.section = Some(token.id.to_string());
            }

            let id = match self.section.as_deref() {
                Some(section) if depth == 1 && is_tagged_section(section) => {
                    tagged_id(section, token.id)
                }
                _ => token.id.to_string(),
            };

            if opens_section {
                self.ancestors.clear();
            } else {
                while self.ancestors.last().is_some_and(|(_, d)| *d >= depth) {
                    self.ancestors.pop();
                }
                if let Some((parent, _)) = self.ancestors.last() {
                    let parent = parent.clone();
                    self.graph.link(&parent, &id);
                }
            }

            let node = self.graph.node_mut(&id);
            node.attributes = decode_attributes(token.raw_attributes);
            node.label = to_label(token.id);
            trace!(id = %id, depth, attributes = ?node.attributes, "node");

            if depth > 0 {
                match self.section.as_deref() {
                    Some(DATABASES_SECTION) => self.graph.record_database(&id),
                    Some(WEB_SERVICES_SECTION) => self.graph.record_web(&id),
                    _ => {}
                }
            }

            self.ancestors.push((id, depth));
        }
    }
}

pub fn build_hierarchy<'a>(graph: &mut InfraGraph, lines: impl IntoIterator<Item = &'a str>) {
    HierarchyBuilder::new(graph).feed(lines);
}
