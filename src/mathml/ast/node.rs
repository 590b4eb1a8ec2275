//! Node model
//!
//! `Node` is the one tree type shared by the parser, the tag codec and the
//! emitter. Variants fall into four shapes (see [`Arity`]):
//!
//! - leaves: `Identifier`, `Number`, `Operator`, `Annotation`
//! - unary: `SquareRoot`, `Fenced`
//! - binary: `Power` (base, exponent), `Fraction` (numerator, denominator)
//! - lists: `Sequence`, `Style`, `Root`
//!
//! Rewrite passes never mutate a node into another variant. They take a node
//! apart with [`Node::into_children`] or [`Node::map_children`] and build the
//! replacement, so every pass is a function from old tree to new tree.

use std::fmt;

/// The operator vocabulary understood by the formula parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Caret,
    OpenParen,
    CloseParen,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Times,
        Operator::Divide,
        Operator::Caret,
        Operator::OpenParen,
        Operator::CloseParen,
    ];

    /// Look up an operator by its exact symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::Caret => "^",
            Operator::OpenParen => "(",
            Operator::CloseParen => ")",
        }
    }

    pub fn is_opening_bracket(self) -> bool {
        self == Operator::OpenParen
    }

    pub fn is_closing_bracket(self) -> bool {
        self == Operator::CloseParen
    }

    pub fn is_bracket(self) -> bool {
        self.is_opening_bracket() || self.is_closing_bracket()
    }

    /// Operators that may directly follow one another in a formula (`+-`, `(-`)
    pub fn is_stackable(self) -> bool {
        matches!(
            self,
            Operator::Plus | Operator::Minus | Operator::OpenParen | Operator::CloseParen
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fieldless mirror of the [`Node`] variants.
///
/// Used as the key of the tag registry, for token history in the build context
/// and for queries such as [`crate::Math::elements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Identifier,
    Number,
    Operator,
    Sequence,
    Power,
    Fraction,
    SquareRoot,
    Fenced,
    Style,
    Annotation,
    Root,
}

impl NodeKind {
    pub const ALL: [NodeKind; 11] = [
        NodeKind::Identifier,
        NodeKind::Number,
        NodeKind::Operator,
        NodeKind::Sequence,
        NodeKind::Power,
        NodeKind::Fraction,
        NodeKind::SquareRoot,
        NodeKind::Fenced,
        NodeKind::Style,
        NodeKind::Annotation,
        NodeKind::Root,
    ];

    /// The element name this kind is (de)serialized under
    pub fn tag_name(self) -> &'static str {
        match self {
            NodeKind::Identifier => "mi",
            NodeKind::Number => "mn",
            NodeKind::Operator => "mo",
            NodeKind::Sequence => "mrow",
            NodeKind::Power => "msup",
            NodeKind::Fraction => "mfrac",
            NodeKind::SquareRoot => "msqrt",
            NodeKind::Fenced => "mfenced",
            NodeKind::Style => "mstyle",
            NodeKind::Annotation => "annotation",
            NodeKind::Root => "math",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            NodeKind::Identifier | NodeKind::Number | NodeKind::Operator | NodeKind::Annotation => {
                Arity::Leaf
            }
            NodeKind::SquareRoot | NodeKind::Fenced => Arity::Unary,
            NodeKind::Power | NodeKind::Fraction => Arity::Binary,
            NodeKind::Sequence | NodeKind::Style | NodeKind::Root => Arity::List,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Identifier => "Identifier",
            NodeKind::Number => "Number",
            NodeKind::Operator => "Operator",
            NodeKind::Sequence => "Sequence",
            NodeKind::Power => "Power",
            NodeKind::Fraction => "Fraction",
            NodeKind::SquareRoot => "SquareRoot",
            NodeKind::Fenced => "Fenced",
            NodeKind::Style => "Style",
            NodeKind::Annotation => "Annotation",
            NodeKind::Root => "Root",
        };
        f.write_str(name)
    }
}

/// How many children a variant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Leaf,
    Unary,
    Binary,
    List,
}

impl Arity {
    /// The exact child count this arity demands, `None` for lists
    pub fn fixed_count(self) -> Option<usize> {
        match self {
            Arity::Leaf => Some(0),
            Arity::Unary => Some(1),
            Arity::Binary => Some(2),
            Arity::List => None,
        }
    }
}

/// A math expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Identifier(String),
    Number(String),
    /// Intermediate parser token; only `+ - * ( )` may survive into a finished tree
    Operator(Operator),
    Sequence(Vec<Node>),
    /// Base, exponent
    Power(Box<Node>, Box<Node>),
    /// Numerator, denominator
    Fraction(Box<Node>, Box<Node>),
    SquareRoot(Box<Node>),
    Fenced(Box<Node>),
    Style(Vec<Node>),
    /// Retained payload, never consulted
    Annotation(String),
    Root(Vec<Node>),
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier(name.into())
    }

    pub fn number(text: impl Into<String>) -> Self {
        Node::Number(text.into())
    }

    pub fn operator(op: Operator) -> Self {
        Node::Operator(op)
    }

    pub fn sequence(children: Vec<Node>) -> Self {
        Node::Sequence(children)
    }

    pub fn power(base: Node, exponent: Node) -> Self {
        Node::Power(Box::new(base), Box::new(exponent))
    }

    pub fn fraction(numerator: Node, denominator: Node) -> Self {
        Node::Fraction(Box::new(numerator), Box::new(denominator))
    }

    pub fn square_root(content: Node) -> Self {
        Node::SquareRoot(Box::new(content))
    }

    pub fn fenced(content: Node) -> Self {
        Node::Fenced(Box::new(content))
    }

    pub fn style(children: Vec<Node>) -> Self {
        Node::Style(children)
    }

    pub fn annotation(text: impl Into<String>) -> Self {
        Node::Annotation(text.into())
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(children)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Number(_) => NodeKind::Number,
            Node::Operator(_) => NodeKind::Operator,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Power(..) => NodeKind::Power,
            Node::Fraction(..) => NodeKind::Fraction,
            Node::SquareRoot(_) => NodeKind::SquareRoot,
            Node::Fenced(_) => NodeKind::Fenced,
            Node::Style(_) => NodeKind::Style,
            Node::Annotation(_) => NodeKind::Annotation,
            Node::Root(_) => NodeKind::Root,
        }
    }

    pub fn arity(&self) -> Arity {
        self.kind().arity()
    }

    /// Text payload of leaves (`Operator` yields its symbol)
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Identifier(text) | Node::Number(text) | Node::Annotation(text) => Some(text),
            Node::Operator(op) => Some(op.symbol()),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Node::Operator(op) => Some(*op),
            _ => None,
        }
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.as_operator() == Some(op)
    }

    /// List-shaped variants (`Sequence`, `Style`, `Root`)
    pub fn is_container(&self) -> bool {
        self.arity() == Arity::List
    }

    /// Ordered children, regardless of how the variant stores them
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Sequence(children) | Node::Style(children) | Node::Root(children) => {
                children.iter().collect()
            }
            Node::Power(first, second) | Node::Fraction(first, second) => {
                vec![first.as_ref(), second.as_ref()]
            }
            Node::SquareRoot(content) | Node::Fenced(content) => vec![content.as_ref()],
            Node::Identifier(_) | Node::Number(_) | Node::Operator(_) | Node::Annotation(_) => {
                Vec::new()
            }
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            Node::Sequence(children) | Node::Style(children) | Node::Root(children) => {
                children.len()
            }
            Node::Power(..) | Node::Fraction(..) => 2,
            Node::SquareRoot(_) | Node::Fenced(_) => 1,
            Node::Identifier(_) | Node::Number(_) | Node::Operator(_) | Node::Annotation(_) => 0,
        }
    }

    /// Take the node apart into its ordered children
    pub fn into_children(self) -> Vec<Node> {
        match self {
            Node::Sequence(children) | Node::Style(children) | Node::Root(children) => children,
            Node::Power(first, second) | Node::Fraction(first, second) => {
                vec![*first, *second]
            }
            Node::SquareRoot(content) | Node::Fenced(content) => vec![*content],
            Node::Identifier(_) | Node::Number(_) | Node::Operator(_) | Node::Annotation(_) => {
                Vec::new()
            }
        }
    }

    /// Rebuild the node with each child replaced by `f(child)`, keeping the variant
    pub fn map_children<F>(self, mut f: F) -> Node
    where
        F: FnMut(Node) -> Node,
    {
        match self {
            Node::Sequence(children) => Node::Sequence(children.into_iter().map(f).collect()),
            Node::Style(children) => Node::Style(children.into_iter().map(f).collect()),
            Node::Root(children) => Node::Root(children.into_iter().map(f).collect()),
            Node::Power(base, exponent) => Node::power(f(*base), f(*exponent)),
            Node::Fraction(numerator, denominator) => {
                Node::fraction(f(*numerator), f(*denominator))
            }
            Node::SquareRoot(content) => Node::square_root(f(*content)),
            Node::Fenced(content) => Node::fenced(f(*content)),
            leaf => leaf,
        }
    }

    /// Rebuild a list-shaped node from `f(children)`; other shapes are returned as is
    pub fn map_list<F>(self, f: F) -> Node
    where
        F: FnOnce(Vec<Node>) -> Vec<Node>,
    {
        match self {
            Node::Sequence(children) => Node::Sequence(f(children)),
            Node::Style(children) => Node::Style(f(children)),
            Node::Root(children) => Node::Root(f(children)),
            other => other,
        }
    }

    /// A `Sequence` whose first and last children are `(` and `)` operator leaves
    pub fn is_bracketed(&self) -> bool {
        match self {
            Node::Sequence(children) if children.len() >= 2 => {
                children[0].is_operator(Operator::OpenParen)
                    && children[children.len() - 1].is_operator(Operator::CloseParen)
            }
            _ => false,
        }
    }

    /// Total number of nodes in this subtree, self included
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|child| child.size()).sum::<usize>()
    }

    /// Pre-order walk over this subtree, self first
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}
