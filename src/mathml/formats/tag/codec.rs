//! Tagged tree codec
//!
//! Maps [`TagElement`] trees to [`Node`] trees and back. The element name picks
//! the node variant through a fixed registry; children are decoded in document
//! order and must match the variant's arity.
//!
//! | Tag          | Node         | Children          |
//! |--------------|--------------|-------------------|
//! | `math`       | `Root`       | any               |
//! | `mrow`       | `Sequence`   | any               |
//! | `mstyle`     | `Style`      | any               |
//! | `msup`       | `Power`      | base, exponent    |
//! | `mfrac`      | `Fraction`   | numerator, denominator |
//! | `msqrt`      | `SquareRoot` | one               |
//! | `mfenced`    | `Fenced`     | one               |
//! | `mi` `mn` `mo` `annotation` | leaves | none     |
//!
//! Leaf text is trimmed. Attributes are carried by `TagElement` but ignored here.

use super::element::TagElement;
use crate::mathml::ast::{Arity, Node, NodeKind, Operator};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Error raised while decoding a tagged tree
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// No node variant is registered under this element name
    UnknownTag(String),
    /// Element has the wrong number of child elements for its variant
    ArityMismatch {
        tag: String,
        expected: usize,
        found: usize,
    },
    /// `mo` text outside the operator vocabulary
    UnknownOperator(String),
    /// Markup text could not be read
    Markup(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnknownTag(tag) => write!(f, "Unknown tag '{}'", tag),
            CodecError::ArityMismatch {
                tag,
                expected,
                found,
            } => write!(
                f,
                "Tag '{}' expects {} child element(s), found {}",
                tag, expected, found
            ),
            CodecError::UnknownOperator(text) => write!(f, "Unknown operator '{}'", text),
            CodecError::Markup(msg) => write!(f, "Invalid markup: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

/// Element name → node kind
static REGISTRY: Lazy<HashMap<&'static str, NodeKind>> = Lazy::new(|| {
    NodeKind::ALL
        .into_iter()
        .map(|kind| (kind.tag_name(), kind))
        .collect()
});

/// The node kind registered under `tag`, if any
pub fn lookup(tag: &str) -> Option<NodeKind> {
    REGISTRY.get(tag).copied()
}

/// Decode a tagged tree into a node tree
pub fn deserialize(element: &TagElement) -> Result<Node, CodecError> {
    let kind = lookup(&element.name).ok_or_else(|| CodecError::UnknownTag(element.name.clone()))?;

    let children = element
        .children
        .iter()
        .map(deserialize)
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(expected) = kind.arity().fixed_count() {
        if children.len() != expected {
            return Err(CodecError::ArityMismatch {
                tag: element.name.clone(),
                expected,
                found: children.len(),
            });
        }
    }

    construct(kind, element.text.trim(), children)
}

fn construct(kind: NodeKind, text: &str, children: Vec<Node>) -> Result<Node, CodecError> {
    let node = match kind.arity() {
        Arity::Leaf => match kind {
            NodeKind::Identifier => Node::identifier(text),
            NodeKind::Number => Node::number(text),
            NodeKind::Annotation => Node::annotation(text),
            _ => {
                let op = Operator::from_symbol(text)
                    .ok_or_else(|| CodecError::UnknownOperator(text.to_string()))?;
                Node::operator(op)
            }
        },
        Arity::Unary | Arity::Binary => {
            let mut operands = children.into_iter();
            match (kind, operands.next(), operands.next()) {
                (NodeKind::SquareRoot, Some(content), None) => Node::square_root(content),
                (NodeKind::Fenced, Some(content), None) => Node::fenced(content),
                (NodeKind::Power, Some(base), Some(exponent)) => Node::power(base, exponent),
                (NodeKind::Fraction, Some(numerator), Some(denominator)) => {
                    Node::fraction(numerator, denominator)
                }
                (kind, first, second) => {
                    return Err(CodecError::ArityMismatch {
                        tag: kind.tag_name().to_string(),
                        expected: kind.arity().fixed_count().unwrap_or_default(),
                        found: first.iter().chain(second.iter()).count(),
                    })
                }
            }
        }
        Arity::List => match kind {
            NodeKind::Sequence => Node::sequence(children),
            NodeKind::Style => Node::style(children),
            _ => Node::root(children),
        },
    };
    Ok(node)
}

/// Encode a node tree as a tagged tree
pub fn serialize(node: &Node) -> TagElement {
    TagElement::new(node.kind().tag_name())
        .with_text(node.text().unwrap_or_default())
        .with_children(node.children().into_iter().map(serialize))
}
