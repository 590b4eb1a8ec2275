//! AST traits - Common interfaces for uniform node access

use super::node::Node;

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
}

impl AstNode for Node {
    fn node_type(&self) -> &'static str {
        match self {
            Node::Identifier(_) => "Identifier",
            Node::Number(_) => "Number",
            Node::Operator(_) => "Operator",
            Node::Sequence(_) => "Sequence",
            Node::Power(..) => "Power",
            Node::Fraction(..) => "Fraction",
            Node::SquareRoot(_) => "SquareRoot",
            Node::Fenced(_) => "Fenced",
            Node::Style(_) => "Style",
            Node::Annotation(_) => "Annotation",
            Node::Root(_) => "Root",
        }
    }

    fn display_label(&self) -> String {
        match self.text() {
            Some(text) => text.to_string(),
            None => format!("{} children", self.child_count()),
        }
    }
}
