//! Bracket elimination stage
//!
//! Removes bracket pairs that grouping kept but that add nothing: a bracketed
//! `Sequence` whose parent is itself a list container (`Sequence`, `Style`,
//! `Root`) loses its outer `(` and `)` leaves. One pair is removed per node and
//! pass; passes repeat until nothing changes.
//!
//! Top-level nodes have no parent and keep their brackets, as do the operands
//! of `Power`, `Fraction`, `SquareRoot` and `Fenced`. The rule looks at the
//! parent only, so `(a*(b+c))` loses the inner pair too.

use crate::mathml::ast::{Arity, Node, NodeKind};
use crate::mathml::transforms::{Runnable, TransformError};

/// Bracket elimination stage
///
/// # Input / Output
/// - `Vec<Node>` - top-level nodes after function folding
pub struct BracketElimination;

impl BracketElimination {
    pub fn new() -> Self {
        BracketElimination
    }
}

impl Default for BracketElimination {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Node>, Vec<Node>> for BracketElimination {
    fn run(&self, input: Vec<Node>) -> Result<Vec<Node>, TransformError> {
        let mut nodes = input;
        loop {
            let (stripped, changed) = strip_pass(nodes);
            nodes = stripped;
            if !changed {
                break;
            }
        }
        Ok(nodes)
    }
}

/// One elimination pass over the top-level list.
///
/// Returns the rewritten list and whether any pair was removed.
pub fn strip_pass(nodes: Vec<Node>) -> (Vec<Node>, bool) {
    let mut changed = false;
    let stripped = nodes
        .into_iter()
        .map(|node| strip_node(node, None, &mut changed))
        .collect();
    (stripped, changed)
}

fn strip_node(node: Node, parent: Option<NodeKind>, changed: &mut bool) -> Node {
    let under_container = parent.map(|kind| kind.arity() == Arity::List) == Some(true);
    let node = if under_container && node.is_bracketed() {
        *changed = true;
        node.map_list(|mut children| {
            children.pop();
            children.remove(0);
            children
        })
    } else {
        node
    };

    let kind = node.kind();
    node.map_children(|child| strip_node(child, Some(kind), changed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathml::ast::Operator;
    use crate::mathml::transforms::stages::{
        BracketGrouping, FunctionFolding, OperatorFolding, Tokenization,
    };

    fn eliminate(formula: &str) -> Vec<Node> {
        let nodes = Tokenization::new().run(formula).unwrap();
        let nodes = BracketGrouping::new().run(nodes).unwrap();
        let nodes = OperatorFolding::new().run(nodes).unwrap();
        let nodes = FunctionFolding::new().run(nodes).unwrap();
        BracketElimination::new().run(nodes).unwrap()
    }

    fn bracketed(children: Vec<Node>) -> Node {
        let mut all = vec![Node::operator(Operator::OpenParen)];
        all.extend(children);
        all.push(Node::operator(Operator::CloseParen));
        Node::sequence(all)
    }

    #[test]
    fn test_top_level_group_keeps_brackets() {
        let nodes = eliminate("(a+b)*c");
        assert!(nodes[0].is_bracketed());
    }

    #[test]
    fn test_fraction_operand_keeps_brackets() {
        let nodes = eliminate("a/(b+c)");
        assert_eq!(
            nodes,
            vec![Node::fraction(
                Node::identifier("a"),
                bracketed(vec![
                    Node::identifier("b"),
                    Node::operator(Operator::Plus),
                    Node::identifier("c"),
                ]),
            )]
        );
    }

    #[test]
    fn test_doubled_brackets_collapse() {
        let nodes = eliminate("((a+b))");
        assert_eq!(
            nodes,
            vec![bracketed(vec![Node::sequence(vec![
                Node::identifier("a"),
                Node::operator(Operator::Plus),
                Node::identifier("b"),
            ])])]
        );
    }

    #[test]
    fn test_nested_group_in_group_is_stripped() {
        let nodes = eliminate("(a*(b+c))");
        let inner = nodes[0].children()[3];
        assert_eq!(inner.child_count(), 3);
        assert!(!inner.is_bracketed());
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        for formula in ["((a+b))", "(((x)))", "a/(b+c)", "2*(3+(4))"] {
            let (again, changed) = strip_pass(eliminate(formula));
            assert!(!changed, "{} changed on a second pass", formula);
            assert_eq!(again, eliminate(formula));
        }
    }

    #[test]
    fn test_strip_pass_reports_change() {
        let input = vec![Node::sequence(vec![bracketed(vec![Node::identifier("x")])])];
        let (output, changed) = strip_pass(input);
        assert!(changed);
        assert_eq!(
            output,
            vec![Node::sequence(vec![Node::sequence(vec![Node::identifier("x")])])]
        );
    }
}
