//! Formula text to tree, through the full parser pipeline

use mathml_cs::mathml::ast::{Node, NodeKind, Operator};
use mathml_cs::mathml::testing::assert_node;
use mathml_cs::mathml::transforms::TransformError;
use mathml_cs::Math;
use rstest::rstest;

fn parse(formula: &str) -> Math {
    Math::from_formula(formula).unwrap_or_else(|e| panic!("{:?} failed to parse: {}", formula, e))
}

#[test]
fn test_sum_stays_flat() {
    assert_node(parse("a+b*2").root())
        .is_root()
        .child_count(1)
        .child(0, |seq| {
            seq.is_sequence()
                .child_count(5)
                .child(0, |a| {
                    a.is_identifier("a");
                })
                .child(1, |plus| {
                    plus.is_operator(Operator::Plus);
                })
                .child(2, |b| {
                    b.is_identifier("b");
                })
                .child(3, |times| {
                    times.is_operator(Operator::Times);
                })
                .child(4, |two| {
                    two.is_number("2");
                });
        });
}

#[test]
fn test_power_folds() {
    assert_node(parse("a^2").root())
        .is_root()
        .fully_folded()
        .child_kinds(&[NodeKind::Power])
        .child(0, |power| {
            power
                .child(0, |base| {
                    base.is_identifier("a");
                })
                .child(1, |exponent| {
                    exponent.is_number("2");
                });
        });
}

#[test]
fn test_denominator_keeps_brackets() {
    assert_node(parse("a/(b+c)").root())
        .child_kinds(&[NodeKind::Fraction])
        .child(0, |fraction| {
            fraction
                .child(0, |numerator| {
                    numerator.is_identifier("a");
                })
                .child(1, |denominator| {
                    denominator.is_bracketed().child_count(5);
                });
        });
}

#[test]
fn test_nested_group_inside_list_loses_brackets() {
    assert_node(parse("(a*(b+c))").root()).child(0, |outer| {
        outer
            .is_bracketed()
            .child(3, |inner| {
                inner.is_sequence().is_not_bracketed().child_count(3);
            });
    });
}

#[test]
fn test_double_brackets_collapse_to_one_pair() {
    assert_node(parse("((a+b))").root()).child(0, |outer| {
        outer
            .is_bracketed()
            .child_count(3)
            .child(1, |inner| {
                inner.is_not_bracketed().child_count(3);
            });
    });
}

#[test]
fn test_sqrt_call() {
    assert_node(parse("sqrt(x)+1").root()).child(0, |seq| {
        seq.child_kinds(&[NodeKind::SquareRoot, NodeKind::Operator, NodeKind::Number])
            .child(0, |root| {
                root.child(0, |argument| {
                    argument.is_bracketed();
                });
            });
    });
}

#[test]
fn test_sqrt_inside_group_stays_an_identifier() {
    let math = parse("2*(sqrt(x))");
    assert!(math.elements(NodeKind::SquareRoot).is_empty());
    let names: Vec<_> = math
        .elements(NodeKind::Identifier)
        .into_iter()
        .filter_map(Node::text)
        .collect();
    assert_eq!(names, vec!["sqrt", "x"]);
}

#[test]
fn test_dangling_caret_is_left_unfolded() {
    assert_node(parse("^a").root()).child(0, |seq| {
        seq.child_kinds(&[NodeKind::Operator, NodeKind::Identifier])
            .child(0, |caret| {
                caret.is_operator(Operator::Caret);
            });
    });
}

#[test]
fn test_unclosed_group_is_flattened() {
    assert_node(parse("(a+b").root()).child(0, |seq| {
        seq.is_not_bracketed().child_count(4);
    });
}

#[test]
fn test_empty_formula() {
    assert_node(parse("").root()).is_root().child_count(0);
    assert_node(parse("   ").root()).is_root().child_count(0);
}

#[rstest(
    formula,
    position,
    case(")", 0),
    case("a)", 1),
    case("(a))", 3),
    case("a+b)*(c", 3)
)]
fn test_unmatched_close_bracket(formula: &str, position: usize) {
    assert_eq!(
        Math::from_formula(formula),
        Err(TransformError::MalformedBrackets { position })
    );
}

#[rstest(
    formula,
    kinds,
    case("a", vec![NodeKind::Identifier]),
    case("42", vec![NodeKind::Number]),
    case("a^b^c", vec![NodeKind::Power]),
    case("a/b/c", vec![NodeKind::Fraction]),
    case("sqrt(a)", vec![NodeKind::SquareRoot]),
    case("(a)", vec![NodeKind::Sequence]),
    case("a b", vec![NodeKind::Sequence])
)]
fn test_top_level_shape(formula: &str, kinds: Vec<NodeKind>) {
    assert_node(parse(formula).root()).child_kinds(&kinds);
}

#[test]
fn test_numbers_and_identifiers_are_split_by_first_character() {
    let math = parse("x1+2y");
    assert_node(math.root()).child(0, |seq| {
        seq.child(0, |x| {
            x.is_identifier("x1");
        })
        .child(2, |n| {
            n.is_number("2y");
        });
    });
}
