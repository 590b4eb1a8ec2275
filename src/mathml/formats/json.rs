//! JSON format
//!
//! The tagged tree of a node, serialized with `serde_json`.

use super::registry::{FormatError, Formatter};
use super::tag::{deserialize, serialize, CodecError, TagElement};
use crate::mathml::ast::Node;

pub fn to_json(node: &Node) -> Result<String, FormatError> {
    serde_json::to_string_pretty(&serialize(node))
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn from_json(source: &str) -> Result<Node, CodecError> {
    let element: TagElement =
        serde_json::from_str(source).map_err(|e| CodecError::Markup(e.to_string()))?;
    deserialize(&element)
}

/// Formatter implementation for JSON
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        to_json(node)
    }
}
