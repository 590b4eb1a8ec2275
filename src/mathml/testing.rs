//! Testing utilities for node assertions
//!
//! A fluent API for checking whole trees at once instead of matching on
//! variants by hand:
//!
//! ```rust,ignore
//! use mathml_cs::mathml::testing::assert_node;
//!
//! let math = Math::from_formula("a/(b+c)")?;
//! assert_node(math.root())
//!     .is_root()
//!     .child_count(1)
//!     .child(0, |fraction| {
//!         fraction
//!             .is_kind(NodeKind::Fraction)
//!             .child(0, |numerator| numerator.is_identifier("a"))
//!             .child(1, |denominator| denominator.is_bracketed());
//!     });
//! ```
//!
//! Every failure message carries the path of the node from the top, such as
//! `root[0][1]`.

use crate::mathml::ast::{Node, NodeKind, Operator};

/// Start asserting on a tree
pub fn assert_node(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn is_kind(self, expected: NodeKind) -> Self {
        let actual = self.node.kind();
        assert_eq!(
            actual, expected,
            "{}: Expected a {} node, but got {} ({:?})",
            self.context, expected, actual, self.node
        );
        self
    }

    pub fn is_root(self) -> Self {
        self.is_kind(NodeKind::Root)
    }

    pub fn is_sequence(self) -> Self {
        self.is_kind(NodeKind::Sequence)
    }

    pub fn is_identifier(self, expected: &str) -> Self {
        self.is_kind(NodeKind::Identifier).text(expected)
    }

    pub fn is_number(self, expected: &str) -> Self {
        self.is_kind(NodeKind::Number).text(expected)
    }

    pub fn is_operator(self, expected: Operator) -> Self {
        assert!(
            self.node.is_operator(expected),
            "{}: Expected operator '{}', but got {:?}",
            self.context,
            expected,
            self.node
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        let actual = self.node.text();
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected text '{}', but got {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    /// A `Sequence` starting with `(` and ending with `)`
    pub fn is_bracketed(self) -> Self {
        assert!(
            self.node.is_bracketed(),
            "{}: Expected a bracketed sequence, but got {:?}",
            self.context,
            self.node
        );
        self
    }

    pub fn is_not_bracketed(self) -> Self {
        assert!(
            !self.node.is_bracketed(),
            "{}: Expected no surrounding brackets, but got {:?}",
            self.context,
            self.node
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.child_count();
        assert_eq!(
            actual, expected,
            "{}: Expected {} children, but got {}",
            self.context, expected, actual
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.node.children();
        let child = children.get(index).copied().unwrap_or_else(|| {
            panic!(
                "{}: Child index {} out of bounds ({} children)",
                self.context,
                index,
                children.len()
            )
        });
        assertion(NodeAssertion {
            node: child,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Check every child, in order, against the given kinds
    pub fn child_kinds(self, expected: &[NodeKind]) -> Self {
        let actual: Vec<NodeKind> = self.node.children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected children {:?}, but got {:?}",
            self.context, expected, actual
        );
        self
    }

    /// No parser-only `^` or `/` operator leaves anywhere below
    pub fn fully_folded(self) -> Self {
        let leftover = self.node.descendants().find(|node| {
            node.is_operator(Operator::Caret) || node.is_operator(Operator::Divide)
        });
        assert!(
            leftover.is_none(),
            "{}: Expected all '^' and '/' to be folded, found {:?}",
            self.context,
            leftover
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::root(vec![Node::sequence(vec![
            Node::number("2"),
            Node::operator(Operator::Times),
            Node::power(Node::identifier("x"), Node::number("3")),
        ])])
    }

    #[test]
    fn test_fluent_chain() {
        assert_node(&sample())
            .is_root()
            .child_count(1)
            .fully_folded()
            .child(0, |seq| {
                seq.is_sequence()
                    .is_not_bracketed()
                    .child_kinds(&[NodeKind::Number, NodeKind::Operator, NodeKind::Power])
                    .child(0, |n| {
                        n.is_number("2");
                    })
                    .child(1, |op| {
                        op.is_operator(Operator::Times);
                    })
                    .child(2, |power| {
                        power
                            .child(0, |base| {
                                base.is_identifier("x");
                            })
                            .child(1, |exponent| {
                                exponent.is_number("3");
                            });
                    });
            });
    }

    #[test]
    #[should_panic(expected = "root[0][2]: Expected a Fraction node")]
    fn test_failure_reports_path() {
        assert_node(&sample()).child(0, |seq| {
            seq.child(2, |node| {
                node.is_kind(NodeKind::Fraction);
            });
        });
    }

    #[test]
    #[should_panic(expected = "Child index 5 out of bounds")]
    fn test_out_of_bounds_child() {
        assert_node(&sample()).child(5, |_| {});
    }
}
