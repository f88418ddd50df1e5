use tracing::debug;
use winnow::prelude::*;
use winnow::combinator::delimited;

use crate::model::GroundRefs;
use crate::node_parser::identifier;

pub const CONNECTIONS_HEADER: &str = "Connections";

const COMMENT_MARKER: &str = "//";
const QUOTE: char = '"';

/// Input lines after comment stripping, split into the node-definition text
/// and the body of the connection sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceText {
    pub node_lines: Vec<String>,
    pub net_lines: Vec<String>,
}

pub fn preprocess(input: &str, ground_refs: &mut GroundRefs) -> SourceText {
    let mut source = split_sections(input.lines().map(strip_comment));
    source.net_lines = expand_ground_refs(&source.net_lines, ground_refs);
    if !ground_refs.is_empty() {
        debug!(names = ?ground_refs.names().collect::<Vec<_>>(), "found ground references");
    }
    source
}

/// Cuts the line at the first `//` that is not inside a double-quoted string.
pub fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        if c == QUOTE {
            in_quotes = !in_quotes;
        } else if !in_quotes && line[i..].starts_with(COMMENT_MARKER) {
            return &line[..i];
        }
    }
    line
}

/// A `Connections` header line opens a connection section and is dropped.
/// Indented lines after it belong to the section until the first non-blank
/// line starting at column 0, which goes back to the node definitions.
pub fn split_sections<'a>(lines: impl IntoIterator<Item = &'a str>) -> SourceText {
    let mut source = SourceText::default();
    let mut in_connections = false;

    for line in lines {
        if line.starts_with(CONNECTIONS_HEADER) {
            in_connections = true;
            continue;
        }
        if in_connections {
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with(char::is_whitespace) {
                source.net_lines.push(line.to_string());
                continue;
            }
            in_connections = false;
        }
        source.node_lines.push(line.to_string());
    }

    source
}

fn ground_ref<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    delimited('/', identifier, '/').parse_next(input)
}

/// Rewrites every `/name/` into `xg_name_<n>`, numbering occurrences of the
/// same name in line order starting at 1.
pub fn expand_ground_refs(lines: &[String], ground_refs: &mut GroundRefs) -> Vec<String> {
    lines
        .iter()
        .map(|line| expand_line(line, ground_refs))
        .collect()
}

fn expand_line(line: &str, ground_refs: &mut GroundRefs) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '/' {
            let mut lookahead = rest;
            if let Ok(name) = ground_ref.parse_next(&mut lookahead) {
                out.push_str(&ground_refs.allocate(name));
                rest = lookahead;
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strip_trailing_comment() {
        assert_eq!(strip_comment("  svc1  // web frontend"), "  svc1  ");
    }

    #[test]
    fn strip_keeps_quoted_marker() {
        let line = r#"node1("a // not a comment")  // real comment"#;
        assert_eq!(strip_comment(line), r#"node1("a // not a comment")  "#);
    }

    #[test]
    fn strip_whole_line_comment() {
        assert_eq!(strip_comment("// nothing here"), "");
    }

    #[test]
    fn strip_without_comment_is_identity() {
        assert_eq!(strip_comment("a -- b"), "a -- b");
    }

    #[test]
    fn split_moves_indented_lines_to_connections() {
        let source = split_sections([
            "Hosts",
            "  vm1",
            "Connections",
            "  a -- b",
            "",
            "  c -- d",
            "Databases",
            "  db1",
        ]);
        assert_eq!(source.node_lines, lines(&["Hosts", "  vm1", "Databases", "  db1"]));
        assert_eq!(source.net_lines, lines(&["  a -- b", "  c -- d"]));
    }

    #[test]
    fn split_header_with_trailing_text() {
        let source = split_sections(["Connections (physical)", "  a -- b"]);
        assert!(source.node_lines.is_empty());
        assert_eq!(source.net_lines, lines(&["  a -- b"]));
    }

    #[test]
    fn ground_refs_one_occurrence() {
        let mut refs = GroundRefs::default();
        let out = expand_ground_refs(&lines(&["  /core/ -- a"]), &mut refs);
        assert_eq!(out, lines(&["  xg_core_1 -- a"]));
        assert_eq!(refs.next_counter("core"), 2);
    }

    #[test]
    fn ground_refs_numbered_across_lines() {
        let mut refs = GroundRefs::default();
        let out = expand_ground_refs(
            &lines(&["  /core/ -- a", "  b -- /core/", "  /edge/ -- /core/"]),
            &mut refs,
        );
        assert_eq!(
            out,
            lines(&["  xg_core_1 -- a", "  b -- xg_core_2", "  xg_edge_1 -- xg_core_3"])
        );
        assert_eq!(refs.names().collect::<Vec<_>>(), vec!["core", "edge"]);
        assert_eq!(refs.next_counter("core"), 4);
    }

    #[test]
    fn ground_refs_twice_on_one_line() {
        let mut refs = GroundRefs::default();
        let out = expand_ground_refs(&lines(&["  /g/ -- /g/"]), &mut refs);
        assert_eq!(out, lines(&["  xg_g_1 -- xg_g_2"]));
    }

    #[test]
    fn lone_slashes_are_kept() {
        let mut refs = GroundRefs::default();
        let out = expand_ground_refs(&lines(&["  a / b -- c/1/"]), &mut refs);
        assert_eq!(out, lines(&["  a / b -- c/1/"]));
        assert!(refs.is_empty());
    }

    #[test]
    fn preprocess_strips_then_expands() {
        let mut refs = GroundRefs::default();
        let source = preprocess("Hosts // all hosts\n  vm1\nConnections\n  /gnd/ -- vm1 // uplink\n", &mut refs);
        assert_eq!(source.node_lines, lines(&["Hosts ", "  vm1"]));
        assert_eq!(source.net_lines, lines(&["  xg_gnd_1 -- vm1 "]));
    }
}
