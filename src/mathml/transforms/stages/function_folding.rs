//! Function folding stage
//!
//! Replaces a function-name identifier and its right neighbour with the node
//! the function stands for. Only `sqrt` is known, producing `SquareRoot`.
//!
//! The scan covers the top-level list only. A call nested in a group, such as
//! `2*(sqrt(x))`, keeps `sqrt` as a plain identifier.

use crate::mathml::ast::Node;
use crate::mathml::token::is_supported_function;
use crate::mathml::transforms::{Runnable, TransformError};

/// Function folding stage
///
/// # Input / Output
/// - `Vec<Node>` - top-level nodes after operator folding
pub struct FunctionFolding;

impl FunctionFolding {
    pub fn new() -> Self {
        FunctionFolding
    }

    fn fold(nodes: Vec<Node>) -> Vec<Node> {
        let mut output = Vec::with_capacity(nodes.len());
        let mut input = nodes.into_iter();

        while let Some(node) = input.next() {
            let is_call = matches!(&node, Node::Identifier(name) if is_supported_function(name));
            if !is_call {
                output.push(node);
                continue;
            }
            match input.next() {
                Some(argument) => output.push(Node::square_root(argument)),
                None => output.push(node),
            }
        }

        output
    }
}

impl Default for FunctionFolding {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Node>, Vec<Node>> for FunctionFolding {
    fn run(&self, input: Vec<Node>) -> Result<Vec<Node>, TransformError> {
        Ok(Self::fold(input))
    }
}
