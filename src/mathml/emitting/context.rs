//! Build context
//!
//! Bookkeeping for one emission: the history of visited tokens, the variables
//! and accumulators the emitted code needs declared, and the denominators that
//! may be zero. A context belongs to a single top-level emission and is
//! dropped afterwards.

use crate::mathml::ast::{Node, NodeKind, Operator};
use crate::mathml::config::EmitOptions;

/// One entry of the token history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Node(NodeKind),
    Operator(Operator),
    /// Boundary between the two operands of a binary node
    Separator,
}

impl TokenKind {
    pub fn of(node: &Node) -> Self {
        match node {
            Node::Operator(op) => TokenKind::Operator(*op),
            other => TokenKind::Node(other.kind()),
        }
    }

    /// Grouping tokens that produce no text of their own
    fn is_transparent(self) -> bool {
        matches!(
            self,
            TokenKind::Node(
                NodeKind::Sequence | NodeKind::Style | NodeKind::Root | NodeKind::Annotation
            )
        )
    }

    /// Tokens whose emission ends with a value
    fn ends_with_value(self) -> bool {
        matches!(
            self,
            TokenKind::Node(NodeKind::Identifier | NodeKind::Number)
                | TokenKind::Operator(Operator::CloseParen)
        )
    }
}

/// A running total the host wants declared before the expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    pub name: String,
    pub initial: String,
}

impl Accumulator {
    pub fn new(name: impl Into<String>, initial: impl Into<String>) -> Self {
        Accumulator {
            name: name.into(),
            initial: initial.into(),
        }
    }

    /// `<type> <name> = <initial>;`
    pub fn declaration(&self, options: &EmitOptions) -> String {
        format!(
            "{} {} = {};",
            options.numeric_type.type_name(),
            self.name,
            self.initial
        )
    }
}

/// Mutable state threaded through one emission
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    options: EmitOptions,
    tokens: Vec<TokenKind>,
    vars: Vec<String>,
    accumulators: Vec<Accumulator>,
    possible_divisions_by_zero: Vec<String>,
}

impl BuildContext {
    pub fn new(options: EmitOptions) -> Self {
        BuildContext {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn record(&mut self, node: &Node) {
        self.tokens.push(TokenKind::of(node));
    }

    pub fn record_separator(&mut self) {
        self.tokens.push(TokenKind::Separator);
    }

    pub fn tokens(&self) -> &[TokenKind] {
        &self.tokens
    }

    /// Whether the next value emitted needs a `*` in front of it.
    ///
    /// True when the latest non-grouping token ended with a value: an
    /// identifier, a number or a closing bracket.
    pub fn last_token_requires_times(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|token| !token.is_transparent())
            .map_or(false, |token| token.ends_with_value())
    }

    /// Record a variable; names are kept once, in first-seen order
    pub fn add_var(&mut self, name: &str) {
        if !self.vars.iter().any(|var| var == name) {
            self.vars.push(name.to_string());
        }
    }

    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    pub fn add_accumulator(&mut self, accumulator: Accumulator) {
        self.accumulators.push(accumulator);
    }

    pub fn accumulators(&self) -> &[Accumulator] {
        &self.accumulators
    }

    pub fn add_possible_division_by_zero(&mut self, denominator: impl Into<String>) {
        self.possible_divisions_by_zero.push(denominator.into());
    }

    pub fn possible_divisions_by_zero(&self) -> &[String] {
        &self.possible_divisions_by_zero
    }

    /// Zero-initialised declaration for a recorded variable
    pub fn var_declaration(&self, name: &str) -> String {
        format!(
            "{} {} = 0.0{};",
            self.options.numeric_type.type_name(),
            name,
            self.options.literal_postfix()
        )
    }

    pub fn division_guard(denominator: &str) -> String {
        format!(
            "Debug.Assert({0} != 0, \"Expression {0} is about to cause division by zero.\");",
            denominator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathml::config::NumericType;

    #[test]
    fn test_times_after_value() {
        let mut ctx = BuildContext::default();
        assert!(!ctx.last_token_requires_times());

        ctx.record(&Node::number("2"));
        assert!(ctx.last_token_requires_times());

        ctx.record(&Node::operator(Operator::Plus));
        assert!(!ctx.last_token_requires_times());

        ctx.record(&Node::operator(Operator::CloseParen));
        assert!(ctx.last_token_requires_times());
    }

    #[test]
    fn test_times_skips_grouping_tokens() {
        let mut ctx = BuildContext::default();
        ctx.record(&Node::identifier("a"));
        ctx.record(&Node::sequence(Vec::new()));
        ctx.record(&Node::style(Vec::new()));
        assert!(ctx.last_token_requires_times());

        ctx.record_separator();
        assert!(!ctx.last_token_requires_times());
    }

    #[test]
    fn test_vars_are_distinct_in_first_seen_order() {
        let mut ctx = BuildContext::default();
        for name in ["b", "a", "b", "c", "a"] {
            ctx.add_var(name);
        }
        assert_eq!(ctx.vars(), &["b", "a", "c"]);
    }

    #[test]
    fn test_declarations_follow_options() {
        let ctx = BuildContext::new(EmitOptions {
            numeric_type: NumericType::Float,
            number_postfix: true,
            division_guards: false,
        });
        assert_eq!(ctx.var_declaration("x"), "float x = 0.0f;");
        assert_eq!(
            Accumulator::new("sum", "0").declaration(ctx.options()),
            "float sum = 0;"
        );
    }

    #[test]
    fn test_division_guard_text() {
        assert_eq!(
            BuildContext::division_guard("b"),
            "Debug.Assert(b != 0, \"Expression b is about to cause division by zero.\");"
        );
    }
}
