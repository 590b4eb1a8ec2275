//! Tokenization stage
//!
//! Converts formula text into a flat stream of leaf nodes using the logos lexer.

use crate::mathml::ast::Node;
use crate::mathml::token::{tokenize, Token};
use crate::mathml::transforms::{Runnable, TransformError};

/// Tokenization stage
///
/// # Input
/// - `String` - formula text such as `a+b*2`
///
/// # Output
/// - `Vec<Node>` - one leaf per token: `Operator` for the operator vocabulary,
///   `Number` for words starting with a digit, `Identifier` for everything else
pub struct Tokenization;

impl Tokenization {
    pub fn new() -> Self {
        Tokenization
    }

    fn classify(token: Token, text: &str) -> Node {
        if let Some(op) = token.as_operator() {
            return Node::operator(op);
        }
        if text.starts_with(|c: char| c.is_numeric()) {
            Node::number(text)
        } else {
            Node::identifier(text)
        }
    }

    fn nodes(source: &str) -> Vec<Node> {
        let nodes: Vec<Node> = tokenize(source)
            .into_iter()
            .filter_map(|(token, span)| {
                let text = source[span].trim();
                (!text.is_empty()).then(|| Self::classify(token, text))
            })
            .collect();
        log::debug!("tokenized formula into {} nodes", nodes.len());
        nodes
    }
}

impl Default for Tokenization {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Vec<Node>> for Tokenization {
    fn run(&self, input: String) -> Result<Vec<Node>, TransformError> {
        Ok(Self::nodes(&input))
    }
}

// Also implement for &str for convenience
impl Runnable<&str, Vec<Node>> for Tokenization {
    fn run(&self, input: &str) -> Result<Vec<Node>, TransformError> {
        Ok(Self::nodes(input))
    }
}
