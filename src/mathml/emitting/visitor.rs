//! Emission visitor
//!
//! Every node records itself in the context's token history, then appends its
//! text. Values (identifiers, numbers, bracketed groups and calls) get a `*` in
//! front when the previous token ended with a value, which turns `2(3+4)` into
//! `2*(3+4)`.
//!
//! | Node          | Emission                                  |
//! |---------------|-------------------------------------------|
//! | `Identifier`  | the name; declared as a variable          |
//! | `Number`      | the literal, plus the configured postfix  |
//! | `Operator`    | the symbol (`^` and `/` are errors)       |
//! | `Power`       | `Math.Pow(base, exponent)`                |
//! | `Fraction`    | `numerator/denominator`                   |
//! | `SquareRoot`  | `Math.Sqrt(argument)`                     |
//! | `Fenced`      | `(content)`                               |
//! | lists         | children in order                         |
//! | `Annotation`  | nothing                                   |
//!
//! A top-level `Root` finishes the statement with `;` and puts the
//! declarations the expression needs in front of it.

use super::context::BuildContext;
use super::EmitError;
use crate::mathml::ast::{Node, Operator};

/// Emit `node` using `ctx` for bookkeeping.
///
/// For a `Root` the result is the full statement block: variable declarations,
/// division guards (if enabled), accumulators, then the expression and `;`.
pub fn emit(node: &Node, ctx: &mut BuildContext) -> Result<String, EmitError> {
    let mut out = String::new();
    visit(node, &mut out, ctx)?;
    match node {
        Node::Root(_) => Ok(finish_root(out, ctx)),
        _ => Ok(out),
    }
}

fn visit(node: &Node, out: &mut String, ctx: &mut BuildContext) -> Result<(), EmitError> {
    match node {
        Node::Identifier(name) => {
            insert_times(out, ctx);
            ctx.record(node);
            out.push_str(name);
            ctx.add_var(name);
        }
        Node::Number(text) => {
            insert_times(out, ctx);
            ctx.record(node);
            out.push_str(text);
            out.push_str(ctx.options().literal_postfix());
        }
        Node::Operator(op) => match op {
            Operator::Caret | Operator::Divide => {
                return Err(EmitError::EmissionFailure(format!(
                    "Operator '{}' is missing an operand",
                    op
                )));
            }
            Operator::OpenParen => {
                insert_times(out, ctx);
                ctx.record(node);
                out.push('(');
            }
            _ => {
                ctx.record(node);
                out.push_str(op.symbol());
            }
        },
        Node::Sequence(children) | Node::Style(children) | Node::Root(children) => {
            ctx.record(node);
            for child in children {
                visit(child, out, ctx)?;
            }
        }
        Node::Annotation(_) => ctx.record(node),
        Node::Fenced(content) => {
            insert_times(out, ctx);
            ctx.record(node);
            out.push('(');
            visit(content, out, ctx)?;
            out.push(')');
        }
        Node::SquareRoot(argument) => {
            insert_times(out, ctx);
            ctx.record(node);
            let argument = operand(argument, ctx, "square root argument", unbracketed)?;
            out.push_str("Math.Sqrt(");
            out.push_str(&argument);
            out.push(')');
        }
        Node::Power(base, exponent) => {
            insert_times(out, ctx);
            ctx.record(node);
            let base = operand(base, ctx, "power base", unbracketed)?;
            ctx.record_separator();
            let exponent = operand(exponent, ctx, "power exponent", unbracketed)?;
            out.push_str(&format!("Math.Pow({}, {})", base, exponent));
        }
        Node::Fraction(numerator, denominator) => {
            insert_times(out, ctx);
            ctx.record(node);
            let numerator = operand(numerator, ctx, "numerator", |node, out, ctx| {
                parenthesized(node, out, ctx, false)
            })?;
            ctx.record_separator();
            let denominator = operand(denominator, ctx, "denominator", |node, out, ctx| {
                parenthesized(node, out, ctx, true)
            })?;
            ctx.add_possible_division_by_zero(denominator.as_str());
            out.push_str(&numerator);
            out.push('/');
            out.push_str(&denominator);
        }
    }
    Ok(())
}

fn insert_times(out: &mut String, ctx: &BuildContext) {
    if ctx.last_token_requires_times() {
        out.push('*');
    }
}

/// Render one operand of a call or fraction into its own buffer
fn operand<F>(node: &Node, ctx: &mut BuildContext, role: &str, write: F) -> Result<String, EmitError>
where
    F: FnOnce(&Node, &mut String, &mut BuildContext) -> Result<(), EmitError>,
{
    if let Node::Operator(op) = node {
        return Err(EmitError::EmissionFailure(format!(
            "Operator '{}' cannot be a {}",
            op, role
        )));
    }
    let mut buf = String::new();
    write(node, &mut buf, ctx)?;
    if buf.trim().is_empty() {
        return Err(EmitError::EmissionFailure(format!("Missing {}", role)));
    }
    Ok(buf)
}

/// Visit a call argument without the brackets the call already provides
fn unbracketed(node: &Node, out: &mut String, ctx: &mut BuildContext) -> Result<(), EmitError> {
    match node {
        Node::Sequence(children) if node.is_bracketed() => {
            ctx.record(node);
            for child in &children[1..children.len() - 1] {
                visit(child, out, ctx)?;
            }
            Ok(())
        }
        Node::Fenced(content) => {
            ctx.record(node);
            visit(content, out, ctx)
        }
        _ => visit(node, out, ctx),
    }
}

/// Visit a fraction operand, adding brackets where `/` would bind wrongly
fn parenthesized(
    node: &Node,
    out: &mut String,
    ctx: &mut BuildContext,
    denominator: bool,
) -> Result<(), EmitError> {
    let wrap = is_compound(node) || (denominator && matches!(node, Node::Fraction(..)));
    if wrap {
        out.push('(');
    }
    visit(node, out, ctx)?;
    if wrap {
        out.push(')');
    }
    Ok(())
}

/// A list of several nodes that does not carry its own brackets
fn is_compound(node: &Node) -> bool {
    match node {
        Node::Sequence(children) | Node::Style(children) | Node::Root(children) => {
            match children.as_slice() {
                [only] => is_compound(only),
                _ => children.len() > 1 && !node.is_bracketed(),
            }
        }
        _ => false,
    }
}

fn finish_root(mut body: String, ctx: &BuildContext) -> String {
    if !body.is_empty() {
        body.push(';');
    }

    let mut lines: Vec<String> = ctx
        .vars()
        .iter()
        .map(|var| ctx.var_declaration(var))
        .collect();
    if ctx.options().division_guards {
        lines.extend(
            ctx.possible_divisions_by_zero()
                .iter()
                .map(|denominator| BuildContext::division_guard(denominator)),
        );
    }
    lines.extend(
        ctx.accumulators()
            .iter()
            .map(|accumulator| accumulator.declaration(ctx.options())),
    );

    let mut text = String::new();
    for line in lines {
        text.push_str(&line);
        text.push('\n');
    }
    text.push_str(&body);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathml::config::{EmitOptions, NumericType};
    use crate::mathml::emitting::Accumulator;

    fn emit_default(node: &Node) -> Result<String, EmitError> {
        emit(node, &mut BuildContext::default())
    }

    fn open() -> Node {
        Node::operator(Operator::OpenParen)
    }

    fn close() -> Node {
        Node::operator(Operator::CloseParen)
    }

    #[test]
    fn test_sum_with_declarations() {
        let root = Node::root(vec![Node::sequence(vec![
            Node::identifier("a"),
            Node::operator(Operator::Plus),
            Node::identifier("b"),
            Node::operator(Operator::Times),
            Node::number("2"),
        ])]);
        assert_eq!(
            emit_default(&root).unwrap(),
            "double a = 0.0;\ndouble b = 0.0;\na+b*2;"
        );
    }

    #[test]
    fn test_implicit_times_before_fenced() {
        let tree = Node::sequence(vec![
            Node::number("2"),
            Node::fenced(Node::sequence(vec![
                Node::number("3"),
                Node::operator(Operator::Plus),
                Node::number("4"),
            ])),
        ]);
        assert_eq!(emit_default(&tree).unwrap(), "2*(3+4)");
    }

    #[test]
    fn test_implicit_times_before_bracket_operator() {
        let tree = Node::sequence(vec![
            Node::number("2"),
            Node::sequence(vec![open(), Node::identifier("x"), close()]),
            Node::identifier("y"),
        ]);
        assert_eq!(emit_default(&tree).unwrap(), "2*(x)*y");
    }

    #[test]
    fn test_no_times_after_operator() {
        let tree = Node::sequence(vec![
            Node::identifier("a"),
            Node::operator(Operator::Minus),
            Node::fenced(Node::identifier("b")),
        ]);
        assert_eq!(emit_default(&tree).unwrap(), "a-(b)");
    }

    #[test]
    fn test_power_and_sqrt_calls() {
        let tree = Node::power(
            Node::square_root(Node::sequence(vec![open(), Node::identifier("x"), close()])),
            Node::number("2"),
        );
        assert_eq!(emit_default(&tree).unwrap(), "Math.Pow(Math.Sqrt(x), 2)");
    }

    #[test]
    fn test_exponent_gets_no_times() {
        let tree = Node::sequence(vec![
            Node::identifier("b"),
            Node::power(Node::identifier("a"), Node::number("2")),
        ]);
        assert_eq!(emit_default(&tree).unwrap(), "b*Math.Pow(a, 2)");
    }

    #[test]
    fn test_fraction_keeps_denominator_brackets() {
        let root = Node::root(vec![Node::fraction(
            Node::identifier("a"),
            Node::sequence(vec![
                open(),
                Node::identifier("b"),
                Node::operator(Operator::Plus),
                Node::identifier("c"),
                close(),
            ]),
        )]);
        let mut ctx = BuildContext::default();
        let text = emit(&root, &mut ctx).unwrap();
        assert!(text.ends_with("\na/(b+c);"));
        assert_eq!(ctx.possible_divisions_by_zero(), &["(b+c)"]);
    }

    #[test]
    fn test_fraction_wraps_compound_operands() {
        let tree = Node::fraction(
            Node::sequence(vec![
                Node::identifier("a"),
                Node::operator(Operator::Plus),
                Node::identifier("b"),
            ]),
            Node::fraction(Node::identifier("c"), Node::identifier("d")),
        );
        assert_eq!(emit_default(&tree).unwrap(), "(a+b)/(c/d)");
    }

    #[test]
    fn test_division_guards() {
        let options = EmitOptions {
            division_guards: true,
            ..EmitOptions::default()
        };
        let root = Node::root(vec![Node::fraction(
            Node::identifier("a"),
            Node::identifier("b"),
        )]);
        let text = emit(&root, &mut BuildContext::new(options)).unwrap();
        assert_eq!(
            text,
            "double a = 0.0;\ndouble b = 0.0;\n\
             Debug.Assert(b != 0, \"Expression b is about to cause division by zero.\");\n\
             a/b;"
        );
    }

    #[test]
    fn test_postfix_and_accumulators() {
        let options = EmitOptions {
            numeric_type: NumericType::Decimal,
            number_postfix: true,
            division_guards: false,
        };
        let mut ctx = BuildContext::new(options);
        ctx.add_accumulator(Accumulator::new("total", "0m"));
        let root = Node::root(vec![Node::sequence(vec![
            Node::identifier("x"),
            Node::operator(Operator::Times),
            Node::number("3"),
        ])]);
        assert_eq!(
            emit(&root, &mut ctx).unwrap(),
            "decimal x = 0.0m;\ndecimal total = 0m;\nx*3m;"
        );
    }

    #[test]
    fn test_annotation_and_style_are_transparent() {
        let root = Node::root(vec![Node::style(vec![
            Node::annotation("a+b"),
            Node::number("1"),
        ])]);
        assert_eq!(emit_default(&root).unwrap(), "1;");
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(emit_default(&Node::root(Vec::new())).unwrap(), "");
    }

    #[test]
    fn test_unfolded_operator_fails() {
        let tree = Node::sequence(vec![Node::operator(Operator::Caret), Node::identifier("a")]);
        assert_eq!(
            emit_default(&tree),
            Err(EmitError::EmissionFailure(
                "Operator '^' is missing an operand".to_string()
            ))
        );
    }

    #[test]
    fn test_empty_operand_fails() {
        let tree = Node::power(Node::identifier("a"), Node::sequence(Vec::new()));
        assert_eq!(
            emit_default(&tree),
            Err(EmitError::EmissionFailure("Missing power exponent".to_string()))
        );
    }

    #[test]
    fn test_operator_operand_fails() {
        let tree = Node::power(Node::operator(Operator::OpenParen), Node::identifier("a"));
        assert_eq!(
            emit_default(&tree),
            Err(EmitError::EmissionFailure(
                "Operator '(' cannot be a power base".to_string()
            ))
        );
        let tree = Node::fraction(Node::identifier("a"), Node::operator(Operator::CloseParen));
        assert_eq!(
            emit_default(&tree),
            Err(EmitError::EmissionFailure(
                "Operator ')' cannot be a denominator".to_string()
            ))
        );
    }
}
