//! Output formats by name
//!
//! `tag`, `json` and `treeviz` come built in. Hosts may register their own
//! [`Formatter`]; a later formatter with the same name replaces the earlier one.

use super::{JsonFormatter, TagFormatter, TreevizFormatter};
use crate::mathml::ast::Node;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter registered under this name
    FormatNotFound(String),
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Writes a node tree as text
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;
    fn serialize(&self, node: &Node) -> Result<String, FormatError>;
}

/// Formatters keyed by name, kept in name order
#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<&'static str, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(TagFormatter);
        registry.register(JsonFormatter);
        registry.register(TreevizFormatter);
        registry
    }

    /// Add a formatter, handing back the one it replaced
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) -> Option<Box<dyn Formatter>> {
        self.formatters.insert(formatter.name(), Box::new(formatter))
    }

    pub fn serialize(&self, node: &Node, format: &str) -> Result<String, FormatError> {
        match self.formatters.get(format) {
            Some(formatter) => formatter.serialize(node),
            None => Err(FormatError::FormatNotFound(format.to_string())),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.keys().copied().collect()
    }
}
