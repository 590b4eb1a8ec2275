//! The `Math` facade
//!
//! Owns one `Root` tree and offers the entry points a host needs: build it from
//! a formula or tagged tree, query it, emit it, render it, or write it in one of
//! the registered formats.
//!
//! ```rust,ignore
//! let math = Math::from_formula("a+b*2")?;
//! assert_eq!(math.emit()?, "double a = 0.0;\ndouble b = 0.0;\na+b*2;");
//! assert_eq!(math.render(), "a+b*2");
//! ```
//!
//! Every emission gets its own [`BuildContext`]; `Math` itself holds no
//! emission state and can be shared freely.

use crate::mathml::ast::{Node, NodeKind};
use crate::mathml::config::EmitOptions;
use crate::mathml::emitting::{self, last_statement, rewrite_power_calls, BuildContext, EmitError};
use crate::mathml::formats::json;
use crate::mathml::formats::tag::{self, CodecError, TagElement};
use crate::mathml::formats::{FormatError, FormatRegistry};
use crate::mathml::transforms::standard::FORMULA_TO_AST;
use crate::mathml::transforms::TransformError;
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

static FORMATS: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// Prefix of the text `render` returns when emission fails
pub const RENDER_FAILURE: &str = "Failed to parse MathMl!";

#[derive(Debug, Clone, PartialEq)]
pub struct Math {
    root: Node,
}

impl Math {
    /// Wrap a tree, adding a `Root` on top unless it already is one
    pub fn from_node(node: Node) -> Self {
        let root = match node {
            Node::Root(_) => node,
            other => Node::root(vec![other]),
        };
        Math { root }
    }

    /// Parse an infix formula.
    ///
    /// Run [`crate::mathml::validation::is_valid`] first when the text comes
    /// from a user; only unmatched `)` is reported here.
    pub fn from_formula(formula: &str) -> Result<Self, TransformError> {
        let root = FORMULA_TO_AST.run(formula.to_string())?;
        debug!("Parsed formula {:?} into {} nodes", formula, root.size());
        Ok(Math::from_node(root))
    }

    pub fn from_tag(element: &TagElement) -> Result<Self, CodecError> {
        tag::deserialize(element).map(Math::from_node)
    }

    /// Read tag markup such as `<math><mi>a</mi></math>`
    pub fn from_markup(source: &str) -> Result<Self, CodecError> {
        tag::node_from_markup(source).map(Math::from_node)
    }

    pub fn from_json(source: &str) -> Result<Self, CodecError> {
        json::from_json(source).map(Math::from_node)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Every node of `kind` below the root, in pre-order
    pub fn elements(&self, kind: NodeKind) -> Vec<&Node> {
        self.root
            .descendants()
            .skip(1)
            .filter(|node| node.kind() == kind)
            .collect()
    }

    pub fn to_tag(&self) -> TagElement {
        tag::serialize(&self.root)
    }

    pub fn to_markup(&self) -> String {
        tag::node_to_markup(&self.root)
    }

    /// Full emission with default options: declarations, then the statement
    pub fn emit(&self) -> Result<String, EmitError> {
        self.emit_with_options(EmitOptions::default())
    }

    pub fn emit_with_options(&self, options: EmitOptions) -> Result<String, EmitError> {
        self.emit_with(&mut BuildContext::new(options))
    }

    /// Emit into a caller-prepared context, e.g. one with accumulators registered
    pub fn emit_with(&self, ctx: &mut BuildContext) -> Result<String, EmitError> {
        emitting::emit(&self.root, ctx)
    }

    /// The expression alone, on one line, with powers written as `^`.
    ///
    /// Never fails: emission errors come back as a diagnostic string starting
    /// with [`RENDER_FAILURE`].
    pub fn render(&self) -> String {
        self.render_with(&mut BuildContext::default())
    }

    pub fn render_with(&self, ctx: &mut BuildContext) -> String {
        match self.emit_with(ctx) {
            Ok(text) => rewrite_power_calls(&last_statement(&text)),
            Err(e) => {
                warn!("Render failed: {}", e);
                format!("{} {}", RENDER_FAILURE, e)
            }
        }
    }

    /// Write the tree in a registered format (`tag`, `json`, `treeviz`)
    pub fn serialize(&self, format: &str) -> Result<String, FormatError> {
        FORMATS.serialize(&self.root, format)
    }

    pub fn formats() -> Vec<&'static str> {
        FORMATS.names()
    }
}

impl From<Node> for Math {
    fn from(node: Node) -> Self {
        Math::from_node(node)
    }
}

impl FromStr for Math {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Math::from_formula(s)
    }
}

impl fmt::Display for Math {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
