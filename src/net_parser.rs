use tracing::{debug, trace};
use winnow::prelude::*;
use winnow::ascii::space0;
use winnow::token::take_while;

use crate::model::{InfraGraph, Net, NetStyle};
use crate::node_parser::identifier;

fn is_style_char(c: char) -> bool {
    c == '-' || c == '.'
}

fn is_tail_char(c: char) -> bool {
    is_style_char(c) || c == '>'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A connector split into its three runs: `--`, `vpnA`, `-->`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Connector<'s> {
    head: &'s str,
    name: &'s str,
    tail: &'s str,
}

impl Connector<'_> {
    fn style(&self) -> NetStyle {
        if self.head.contains('-') || self.tail.contains('-') {
            NetStyle::Solid
        } else {
            NetStyle::Dashed
        }
    }
}

fn right_node<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    space0.parse_next(input)?;
    identifier.parse_next(input)
}

/// Matches `[-.]+ <word>* [-.>]+` followed by the right-hand node.
/// Runs are tried longest first, giving back characters until the right
/// node parses, so `a --b` reads as `a -- b` rather than a net named `b`.
fn connector_and_right<'s>(input: &mut &'s str) -> winnow::Result<(Connector<'s>, &'s str)> {
    let start = *input;
    let head_run = take_while(1.., is_style_char).parse_next(input)?;
    let after_head = *input;
    let name_run = take_while(0.., is_name_char).parse_next(input)?;
    let tail_run = take_while(0.., is_tail_char).parse_next(input)?;

    for head_len in (1..=head_run.len()).rev() {
        let head = &start[..head_len];
        let head_rest = &start[head_len..];
        // the name run is only reachable when the head took the whole style run;
        // a partial name can never be followed by a tail
        let name_lens: &[usize] = if head_len == head_run.len() && !name_run.is_empty() {
            &[name_run.len(), 0]
        } else {
            &[0]
        };
        for &name_len in name_lens {
            let name = &head_rest[..name_len];
            let name_rest = &head_rest[name_len..];
            let tail_max = if name_len == name_run.len() && head_len == head_run.len() {
                tail_run.len()
            } else if name_len == 0 && head_len < head_run.len() {
                head_run.len() - head_len
            } else {
                0
            };
            for tail_len in (1..=tail_max).rev() {
                let mut rest = &name_rest[tail_len..];
                if let Ok(right) = right_node.parse_next(&mut rest) {
                    *input = rest;
                    let tail = &name_rest[..tail_len];
                    return Ok((Connector { head, name, tail }, right));
                }
            }
        }
    }

    *input = after_head;
    Err(winnow::error::ParserError::from_input(input))
}

fn net_line(input: &mut &str) -> winnow::Result<Net> {
    let left = identifier.parse_next(input)?;
    space0.parse_next(input)?;
    let (connector, right) = connector_and_right.parse_next(input)?;
    let name = (!connector.name.is_empty()).then(|| connector.name.to_string());
    Ok(Net {
        left: left.to_string(),
        right: right.to_string(),
        style: connector.style(),
        name,
    })
}

/// Parses one connection statement. Only the start of the line has to
/// match; anything after the right node is ignored.
pub fn parse_net(line: &str) -> Option<Net> {
    let mut input = line.trim();
    net_line(&mut input).ok()
}

pub fn extract_nets<'a>(graph: &mut InfraGraph, lines: impl IntoIterator<Item = &'a str>) {
    for line in lines {
        match parse_net(line) {
            Some(net) => {
                trace!(left = %net.left, right = %net.right, name = ?net.name, "net");
                graph.nets.push(net);
            }
            None => debug!(line = line.trim(), "skipping unrecognized connection"),
        }
    }
}
