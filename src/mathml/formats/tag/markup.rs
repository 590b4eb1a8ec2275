//! XML-like markup for tagged trees
//!
//! Reads and writes the textual form of a [`TagElement`] tree:
//!
//! ```text
//! <math>
//!   <msup>
//!     <mi>a</mi>
//!     <mn>2</mn>
//!   </msup>
//! </math>
//! ```
//!
//! The reader is a small chumsky grammar. It accepts an optional `<?xml ...?>`
//! prolog, comments, quoted attributes, self-closing elements and the five
//! predefined entities plus numeric character references. Namespaces, CDATA
//! and DTDs are not supported.

use super::codec::CodecError;
use super::element::TagElement;
use chumsky::prelude::*;
use std::collections::BTreeMap;

type ParserError = Simple<char>;

/// One piece of element content
#[derive(Debug, Clone)]
enum Content {
    Element(TagElement),
    Text(String),
    Comment,
}

fn misc() -> impl Parser<char, (), Error = ParserError> + Clone {
    let comment = just("<!--").then(take_until(just("-->"))).ignored();
    comment.or(filter(|c: &char| c.is_whitespace()).ignored()).repeated().ignored()
}

fn name() -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(|c: &char| c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .repeated()
        .at_least(1)
        .collect::<String>()
}

fn attribute() -> impl Parser<char, (String, String), Error = ParserError> + Clone {
    let quoted = |quote: char| {
        just(quote)
            .ignore_then(filter(move |c: &char| *c != quote).repeated())
            .then_ignore(just(quote))
            .collect::<String>()
    };

    name()
        .then_ignore(just('=').padded())
        .then(quoted('"').or(quoted('\'')))
        .map(|(key, value)| (key, decode_entities(&value)))
}

fn element() -> impl Parser<char, TagElement, Error = ParserError> + Clone {
    recursive(|element| {
        let open = just('<')
            .ignore_then(name())
            .then(attribute().padded().repeated())
            .then_ignore(text::whitespace());

        let comment = just("<!--")
            .then(take_until(just("-->")))
            .to(Content::Comment);
        let characters = filter(|c: &char| *c != '<')
            .repeated()
            .at_least(1)
            .collect::<String>()
            .map(|raw| Content::Text(decode_entities(&raw)));
        let content = choice((comment, element.map(Content::Element), characters)).repeated();

        let close = just("</")
            .ignore_then(name())
            .then_ignore(text::whitespace())
            .then_ignore(just('>'));

        let self_closing = just("/>").to(None);
        let with_body = just('>')
            .ignore_then(content)
            .then(close)
            .map(Some);

        open.then(self_closing.or(with_body)).try_map(
            |((name, attributes), body), span| {
                let mut element = TagElement::new(name);
                element.attributes = attributes.into_iter().collect::<BTreeMap<_, _>>();

                if let Some((content, closing)) = body {
                    if closing != element.name {
                        return Err(Simple::custom(
                            span,
                            format!("expected </{}>, found </{}>", element.name, closing),
                        ));
                    }
                    for item in content {
                        match item {
                            Content::Element(child) => element.children.push(child),
                            Content::Text(piece) => element.text.push_str(&piece),
                            Content::Comment => {}
                        }
                    }
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                }

                Ok(element)
            },
        )
    })
}

fn document() -> impl Parser<char, TagElement, Error = ParserError> {
    let prolog = just("<?").then(take_until(just("?>"))).ignored();

    misc()
        .ignore_then(prolog.or_not())
        .ignore_then(misc())
        .ignore_then(element())
        .then_ignore(misc())
        .then_ignore(end())
}

/// Read markup text into a tagged tree
pub fn parse_markup(source: &str) -> Result<TagElement, CodecError> {
    document().parse(source).map_err(|errors| {
        let message = errors
            .into_iter()
            .map(|error| describe(&error))
            .collect::<Vec<_>>()
            .join("; ");
        CodecError::Markup(message)
    })
}

fn describe(error: &ParserError) -> String {
    match error.reason() {
        chumsky::error::SimpleReason::Custom(msg) => {
            format!("{} at {}", msg, error.span().start)
        }
        _ => match error.found() {
            Some(found) => format!("unexpected '{}' at {}", found, error.span().start),
            None => "unexpected end of input".to_string(),
        },
    }
}

/// Write a tagged tree as indented markup, two spaces per level
pub fn write_markup(element: &TagElement) -> String {
    let mut output = String::new();
    write_element(element, 0, &mut output);
    output
}

fn write_element(element: &TagElement, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    let mut open = element.name.clone();
    for (key, value) in &element.attributes {
        open.push_str(&format!(" {}=\"{}\"", key, escape_xml(value)));
    }

    if element.children.is_empty() {
        if element.text.is_empty() {
            output.push_str(&format!("{}<{}/>\n", indent, open));
        } else {
            output.push_str(&format!(
                "{}<{}>{}</{}>\n",
                indent,
                open,
                escape_xml(&element.text),
                element.name
            ));
        }
        return;
    }

    output.push_str(&format!("{}<{}>{}\n", indent, open, escape_xml(&element.text)));
    for child in &element.children {
        write_element(child, depth + 1, output);
    }
    output.push_str(&format!("{}</{}>\n", indent, element.name));
}

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Replace predefined entities and numeric character references.
///
/// Unknown or malformed references are kept as written.
pub fn decode_entities(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let decoded = candidate
            .find(';')
            .and_then(|end| entity(&candidate[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                output.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                output.push('&');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
