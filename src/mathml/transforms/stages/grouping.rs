//! Bracket grouping stage
//!
//! Every parenthesized run of the flat node stream becomes one nested
//! `Sequence` that still carries its `(` and `)` leaves. Whether the brackets
//! are needed is decided later, by bracket elimination.

use crate::mathml::ast::{Node, Operator};
use crate::mathml::transforms::{Runnable, TransformError};

/// Bracket grouping stage
///
/// # Input
/// - `Vec<Node>` - flat stream from tokenization
///
/// # Output
/// - `Vec<Node>` - the same leaves with each `( ... )` run wrapped in a `Sequence`
///
/// A `)` with no open group fails with [`TransformError::MalformedBrackets`].
/// A `(` that is never closed leaves its run flat.
pub struct BracketGrouping;

impl BracketGrouping {
    pub fn new() -> Self {
        BracketGrouping
    }

    fn group(nodes: Vec<Node>) -> Result<Vec<Node>, TransformError> {
        // frames[0] is the top level; every open bracket pushes a frame starting with its `(`
        let mut frames: Vec<Vec<Node>> = vec![Vec::new()];

        for (position, node) in nodes.into_iter().enumerate() {
            match node.as_operator() {
                Some(Operator::OpenParen) => frames.push(vec![node]),
                Some(Operator::CloseParen) => {
                    if frames.len() == 1 {
                        return Err(TransformError::MalformedBrackets { position });
                    }
                    let mut group = frames.pop().unwrap_or_default();
                    group.push(node);
                    if let Some(parent) = frames.last_mut() {
                        parent.push(Node::sequence(group));
                    }
                }
                _ => {
                    if let Some(current) = frames.last_mut() {
                        current.push(node);
                    }
                }
            }
        }

        while frames.len() > 1 {
            let unclosed = frames.pop().unwrap_or_default();
            if let Some(parent) = frames.last_mut() {
                parent.extend(unclosed);
            }
        }

        Ok(frames.pop().unwrap_or_default())
    }
}

impl Default for BracketGrouping {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Node>, Vec<Node>> for BracketGrouping {
    fn run(&self, input: Vec<Node>) -> Result<Vec<Node>, TransformError> {
        let grouped = Self::group(input)?;
        log::debug!("bracket grouping left {} top-level nodes", grouped.len());
        Ok(grouped)
    }
}
