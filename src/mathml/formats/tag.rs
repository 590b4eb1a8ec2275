//! Tagged tree format
//!
//! - [`element`]: the `TagElement` exchange tree
//! - [`codec`]: `TagElement` ⇄ `Node`, driven by the tag-name registry
//! - [`markup`]: `TagElement` ⇄ XML-like text

pub mod codec;
pub mod element;
pub mod markup;

pub use codec::{deserialize, lookup, serialize, CodecError};
pub use element::TagElement;
pub use markup::{parse_markup, write_markup};

use super::registry::{FormatError, Formatter};
use crate::mathml::ast::Node;

/// Read markup text straight into a node tree
pub fn node_from_markup(source: &str) -> Result<Node, CodecError> {
    deserialize(&parse_markup(source)?)
}

/// Write a node tree as markup text
pub fn node_to_markup(node: &Node) -> String {
    write_markup(&serialize(node))
}

/// Formatter implementation for the tag markup format
pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(node_to_markup(node))
    }
}
