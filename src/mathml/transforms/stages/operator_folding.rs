//! Operator folding stage
//!
//! Turns `x ^ y` into `Power(x, y)` and `x / y` into `Fraction(x, y)` by
//! combining an operator leaf with its immediate neighbours. This is strict
//! neighbour folding, not a precedence parser. Passes repeat until one full
//! pass changes nothing.
//!
//! Each fold consumes two nodes and never creates a new `^`/`/` leaf, so the
//! number of folding passes is bounded by the number of operator leaves.
//! Operator leaves, `(` and `)` included, are never taken as operands.

use crate::mathml::ast::{Node, Operator};
use crate::mathml::transforms::{Runnable, TransformError};

/// Operator folding stage
///
/// # Input / Output
/// - `Vec<Node>` - grouped top-level nodes
///
/// A `^` or `/` missing either operand is left as an operator leaf.
pub struct OperatorFolding;

impl OperatorFolding {
    pub fn new() -> Self {
        OperatorFolding
    }
}

impl Default for OperatorFolding {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Node>, Vec<Node>> for OperatorFolding {
    fn run(&self, input: Vec<Node>) -> Result<Vec<Node>, TransformError> {
        let (nodes, folding_passes) = fold_to_fixpoint(input);
        log::debug!(
            "operator folding reached a fixpoint after {} folding passes",
            folding_passes
        );
        Ok(nodes)
    }
}

/// Repeat [`fold_pass`] until nothing changes.
///
/// Returns the folded list and the number of passes that folded something;
/// the final, unchanged pass is not counted.
pub fn fold_to_fixpoint(nodes: Vec<Node>) -> (Vec<Node>, usize) {
    let mut nodes = nodes;
    let mut folding_passes = 0;
    loop {
        let (folded, changed) = fold_pass(nodes);
        nodes = folded;
        if !changed {
            return (nodes, folding_passes);
        }
        folding_passes += 1;
    }
}

/// One folding pass over a node list, recursing into every nested node.
///
/// Returns the rewritten list and whether any fold happened.
pub fn fold_pass(nodes: Vec<Node>) -> (Vec<Node>, bool) {
    let mut changed = false;
    let folded = fold_list(nodes, &mut changed);
    (folded, changed)
}

fn fold_list(nodes: Vec<Node>, changed: &mut bool) -> Vec<Node> {
    let mut output: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut input = nodes.into_iter().peekable();

    while let Some(node) = input.next() {
        let fold = match node.as_operator() {
            Some(Operator::Caret) => Some(Node::power as fn(Node, Node) -> Node),
            Some(Operator::Divide) => Some(Node::fraction as fn(Node, Node) -> Node),
            _ => None,
        };

        // Operator leaves, brackets included, never serve as operands
        let right = match fold {
            Some(_) if output.last().map_or(false, is_operand) => {
                input.next_if(|next| is_operand(next))
            }
            _ => None,
        };

        match (fold, right) {
            (Some(build), Some(right)) => {
                let left = output.pop().unwrap_or(node);
                output.push(build(left, fold_node(right, changed)));
                *changed = true;
            }
            _ => output.push(fold_node(node, changed)),
        }
    }

    output
}

fn is_operand(node: &Node) -> bool {
    !matches!(node, Node::Operator(_))
}

fn fold_node(node: Node, changed: &mut bool) -> Node {
    if node.is_container() {
        node.map_list(|children| fold_list(children, changed))
    } else {
        node.map_children(|child| fold_node(child, changed))
    }
}
