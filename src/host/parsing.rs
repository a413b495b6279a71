use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, tag_no_case, take_till, take_till1, take_until},
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{all_consuming, eof, map, opt, recognize, value, verify},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use std::borrow::Cow;
use tracing::{span, Level};

use super::document::{NAME_STOP_CHARS, TAG_STOP_CHARS};
use super::serialize::VOID_ELEMENTS;
use super::{Document, DomError, NodeId};

/// Markup parsed but not yet inserted into a document
#[derive(Debug, PartialEq)]
enum Markup<'a> {
    Element {
        name: &'a str,
        attributes: Vec<(&'a str, Cow<'a, str>)>,
        children: Vec<Markup<'a>>,
    },
    Text(Cow<'a, str>),
    Comment,
}

/// Replaces the basic character references
fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    const REFERENCES: [(&str, char); 6] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
        ("&apos;", '\''),
    ];
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match REFERENCES.iter().find(|(r, _)| rest.starts_with(r)) {
            Some((r, c)) => {
                out.push(*c);
                rest = &rest[r.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Attempt to parse a string as a valid tag name
fn parse_tag_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_till(|c: char| TAG_STOP_CHARS.contains(c)),
    ))(input)
}

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_till(|c: char| c == '\''), char('\''))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c: char| c == '"'), char('"'))(input)
}

fn parse_unquoted(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'=<>`")(input)
}

fn value_parser(input: &str) -> IResult<&str, &str> {
    alt((parse_single_quoted, parse_double_quoted, parse_unquoted))(input)
}

fn name_parser(input: &str) -> IResult<&str, &str> {
    is_not(NAME_STOP_CHARS)(input)
}

/// `name`, `name=value`, `name="value"` or `name='value'`. Bare names get an empty value.
fn single_attr_parser(input: &str) -> IResult<&str, (&str, Cow<'_, str>)> {
    let (rest, name) = name_parser(input)?;
    let (rest, value) = opt(preceded(
        tuple((multispace0, char('='), multispace0)),
        value_parser,
    ))(rest)?;
    Ok((rest, (name, decode_entities(value.unwrap_or("")))))
}

/// Parse a tag in the form `<name attr=value ...>`, returning the name and the
/// attributes. A `/` before the `>` is accepted and dropped.
#[allow(clippy::type_complexity)]
fn parse_open_tag(input: &str) -> IResult<&str, (&str, Vec<(&str, Cow<'_, str>)>)> {
    let (rest, (_, name, attrs, _, _, _)) = tuple((
        char('<'),
        parse_tag_name,
        many0(preceded(multispace1, single_attr_parser)),
        multispace0,
        opt(char('/')),
        char('>'),
    ))(input)?;
    Ok((rest, (name, attrs)))
}

/// Parse a tag in the form `</name>`, returning `name`
fn parse_close_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("</"), parse_tag_name, terminated(multispace0, char('>')))(input)
}

/// Parse the content between tags
fn parse_text(input: &str) -> IResult<&str, Markup<'_>> {
    map(take_till1(|c: char| c == '<'), |s| Markup::Text(decode_entities(s)))(input)
}

fn parse_comment(input: &str) -> IResult<&str, Markup<'_>> {
    map(delimited(tag("<!--"), take_until("-->"), tag("-->")), |_| Markup::Comment)(input)
}

fn parse_doctype(input: &str) -> IResult<&str, Markup<'_>> {
    map(delimited(tag_no_case("<!doctype"), is_not(">"), char('>')), |_| Markup::Comment)(input)
}

/// Parse a complete element, returning the [`Markup`] tree.
///
/// Only void elements have no content; a trailing `/` on any other start tag
/// is ignored. An element left open at the end of input closes there.
fn parse_element(input: &str) -> IResult<&str, Markup<'_>> {
    let (rest, (name, attributes)) = parse_open_tag(input)?;
    if VOID_ELEMENTS.contains(name.to_ascii_lowercase().as_str()) {
        let element = Markup::Element {
            name,
            attributes,
            children: vec![],
        };
        return Ok((rest, element));
    }
    let (rest, (children, _)) = pair(
        many0(parse_node),
        alt((
            value((), verify(parse_close_tag, |close: &str| close.eq_ignore_ascii_case(name))),
            value((), eof),
        )),
    )(rest)?;
    Ok((
        rest,
        Markup::Element {
            name,
            attributes,
            children,
        },
    ))
}

fn parse_node(input: &str) -> IResult<&str, Markup<'_>> {
    alt((parse_comment, parse_doctype, parse_element, parse_text))(input)
}

fn parse_fragment(input: &str) -> IResult<&str, Vec<Markup<'_>>> {
    all_consuming(many0(parse_node))(input)
}

impl Document {
    /// Parses a markup fragment into detached nodes and returns its first
    /// top-level element. Text and comments around it are dropped.
    pub fn parse_fragment(&mut self, markup: &str) -> Result<NodeId, DomError> {
        let span = span!(Level::DEBUG, "Parsing fragment");
        let _enter = span.enter();
        let (_, nodes) = parse_fragment(markup).map_err(|e| DomError::Parse(e.to_string()))?;
        let first = nodes
            .into_iter()
            .find(|n| matches!(n, Markup::Element { .. }))
            .ok_or_else(|| DomError::Parse("fragment contains no element".to_string()))?;
        self.insert_markup(first)?
            .ok_or_else(|| DomError::Parse("fragment contains no element".to_string()))
    }

    fn insert_markup(&mut self, markup: Markup) -> Result<Option<NodeId>, DomError> {
        match markup {
            Markup::Comment => Ok(None),
            Markup::Text(text) => Ok(Some(self.create_text(&text))),
            Markup::Element {
                name,
                attributes,
                children,
            } => {
                let el = self.create_element(name)?;
                for (name, value) in attributes {
                    self.set_attribute(el, name, &value)?;
                }
                for child in children {
                    if let Some(child) = self.insert_markup(child)? {
                        self.append_child(el, child)?;
                    }
                }
                Ok(Some(el))
            }
        }
    }
}
