//! Tagged tree element
//!
//! The exchange form of a node tree: an element name, optional attributes,
//! text content and ordered child elements. Both the markup reader and the
//! JSON format work on this type; the codec maps it to and from [`Node`].
//!
//! [`Node`]: crate::mathml::ast::Node

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TagElement>,
}

impl TagElement {
    pub fn new(name: impl Into<String>) -> Self {
        TagElement {
            name: name.into(),
            ..Default::default()
        }
    }

    /// An element holding only text, such as `<mi>x</mi>`
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        TagElement::new(name).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: TagElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TagElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
