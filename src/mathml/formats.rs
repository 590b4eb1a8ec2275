//! Serialization formats for node trees
//!
//! - [`tag`]: the tagged-tree codec and its XML-like markup reader/writer
//! - [`json`]: the tagged tree as JSON
//! - [`treeviz`]: one line per node, for eyeballing trees in tests and logs
//!
//! All formats are reachable by name through [`FormatRegistry`].

pub mod json;
pub mod registry;
pub mod tag;
pub mod treeviz;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tag::{
    deserialize, parse_markup, serialize, write_markup, CodecError, TagElement, TagFormatter,
};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
