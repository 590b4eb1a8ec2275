//! Assembly stage
//!
//! Wraps the remaining top-level nodes into the `Root` node: several nodes go
//! into one `Sequence` under the root, a single node (or none) becomes the
//! root's content directly.

use crate::mathml::ast::Node;
use crate::mathml::transforms::{Runnable, TransformError};

/// Assembly stage
///
/// # Input
/// - `Vec<Node>` - top-level nodes after bracket elimination
///
/// # Output
/// - `Node` - always a `Node::Root`
pub struct Assembly;

impl Assembly {
    pub fn new() -> Self {
        Assembly
    }
}

impl Default for Assembly {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Node>, Node> for Assembly {
    fn run(&self, input: Vec<Node>) -> Result<Node, TransformError> {
        if input.len() > 1 {
            Ok(Node::root(vec![Node::sequence(input)]))
        } else {
            Ok(Node::root(input))
        }
    }
}
