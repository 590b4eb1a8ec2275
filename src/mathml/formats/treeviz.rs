//! Treeviz formatter for node trees
//!
//! One line per node, nesting shown with box-drawing connectors:
//!
//! ```text
//! ⧉ Root
//! └─ ☰ 3 children
//!   ├─ 𝑥 a
//!   ├─ ± +
//!   └─ ^ 2 children
//!     ├─ 𝑥 b
//!     └─ # 2
//! ```
//!
//! Icons:
//!     Root: ⧉
//!     Sequence: ☰
//!     Style: ≋
//!     Identifier: 𝑥
//!     Number: #
//!     Operator: ±
//!     Power: ^
//!     Fraction: ÷
//!     SquareRoot: √
//!     Fenced: ◌
//!     Annotation: "

use super::registry::{FormatError, Formatter};
use crate::mathml::ast::{AstNode, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node: &Node) -> &'static str {
    match node {
        Node::Root(_) => "⧉",
        Node::Sequence(_) => "☰",
        Node::Style(_) => "≋",
        Node::Identifier(_) => "𝑥",
        Node::Number(_) => "#",
        Node::Operator(_) => "±",
        Node::Power(..) => "^",
        Node::Fraction(..) => "÷",
        Node::SquareRoot(_) => "√",
        Node::Fenced(_) => "◌",
        Node::Annotation(_) => "\"",
    }
}

fn format_node(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(node),
        truncate(&node.display_label(), 30)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(node, &child_prefix, output);
}

fn format_children(node: &Node, prefix: &str, output: &mut String) {
    let children = node.children();
    let child_count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        format_node(child, prefix, i == child_count - 1, output);
    }
}

/// Render a tree; the top node gets no connector and is labelled by its type
pub fn to_treeviz_str(node: &Node) -> String {
    let label = if node.child_count() == 0 {
        node.display_label()
    } else {
        node.node_type().to_string()
    };
    let mut output = format!("{} {}\n", get_icon(node), truncate(&label, 30));
    format_children(node, "", &mut output);
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &'static str {
        "treeviz"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(node))
    }
}
