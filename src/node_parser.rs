use winnow::prelude::*;
use winnow::ascii::space0;
use winnow::combinator::{alt, delimited, opt, preceded};
use winnow::error::ContextError;
use winnow::token::{one_of, take_till, take_while};

/// One `name[attrs]` / `name(attrs)` / `name` occurrence on a definition line.
/// `raw_attributes` keeps its delimiters and is empty when there is no block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeToken<'s> {
    pub id: &'s str,
    pub raw_attributes: &'s str,
}

/// Letter or underscore, then letters, digits and underscores. Letters and
/// digits are Unicode-aware here and in connection group names.
pub(crate) fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_'),
        take_while(0.., is_word_char),
    )
        .take()
        .parse_next(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn word<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., is_word_char).parse_next(input)
}

fn quoted<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

fn attribute_block<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    alt((
        ('[', take_till(0.., ']'), ']').take(),
        ('(', take_till(0.., ')'), ')').take(),
    ))
    .parse_next(input)
}

fn node_token<'s>(input: &mut &'s str) -> winnow::Result<NodeToken<'s>> {
    let id = identifier.parse_next(input)?;
    let raw_attributes = opt(preceded(space0, attribute_block))
        .parse_next(input)?
        .unwrap_or("");
    Ok(NodeToken { id, raw_attributes })
}

/// Applies `parser` at every position of `input`, skipping one character
/// whenever it does not match, and collects the non-overlapping matches.
pub(crate) fn find_all<'s, O>(
    input: &'s str,
    mut parser: impl Parser<&'s str, O, ContextError>,
) -> Vec<O> {
    let mut found = Vec::new();
    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        let mut lookahead = rest;
        match parser.parse_next(&mut lookahead) {
            Ok(out) if lookahead.len() < rest.len() => {
                found.push(out);
                rest = lookahead;
            }
            _ => rest = &rest[c.len_utf8()..],
        }
    }
    found
}

pub fn extract_tokens(line: &str) -> Vec<NodeToken<'_>> {
    find_all(line.trim(), node_token)
}

/// Splits a raw attribute block into its atoms. `[...]` yields quoted strings
/// (without the quotes) and bare words, `(...)` yields bare words only.
pub fn decode_attributes(raw: &str) -> Vec<String> {
    if raw.starts_with('[') {
        let inner = raw.trim_matches(|c: char| c == '[' || c == ']');
        find_all(inner, alt((quoted, word)))
            .into_iter()
            .map(str::to_string)
            .collect()
    } else if raw.starts_with('(') {
        let inner = raw.trim_matches(|c: char| c == '(' || c == ')');
        find_all(inner, word)
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    }
}
