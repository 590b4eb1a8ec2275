//! Tagged trees: markup in, code out, and back again

use mathml_cs::mathml::ast::NodeKind;
use mathml_cs::mathml::formats::{CodecError, TagElement};
use mathml_cs::mathml::testing::assert_node;
use mathml_cs::Math;

fn from_markup(source: &str) -> Math {
    Math::from_markup(source).unwrap_or_else(|e| panic!("markup failed to decode: {}", e))
}

#[test]
fn test_fraction_with_compound_operands() {
    let math = from_markup(
        r#"<math>
  <mfrac>
    <mrow><mi>a</mi><mo>+</mo><mi>b</mi></mrow>
    <mrow><mi>c</mi><mo>-</mo><mn>1</mn></mrow>
  </mfrac>
</math>"#,
    );
    assert_node(math.root()).child_kinds(&[NodeKind::Fraction]);
    assert_eq!(math.render(), "(a+b)/(c-1)");
}

#[test]
fn test_nested_fraction_in_denominator() {
    let math = from_markup(
        "<math><mfrac><mi>a</mi><mfrac><mi>b</mi><mi>c</mi></mfrac></mfrac></math>",
    );
    assert_eq!(math.render(), "a/(b/c)");
    assert_eq!(
        math.emit().unwrap(),
        "double a = 0.0;\ndouble b = 0.0;\ndouble c = 0.0;\na/(b/c);"
    );
}

#[test]
fn test_power_of_a_row() {
    let math = from_markup(
        "<math><msup><mrow><mi>a</mi><mo>+</mo><mn>1</mn></mrow><mn>2</mn></msup></math>",
    );
    assert_eq!(math.emit().unwrap(), "double a = 0.0;\nMath.Pow(a+1, 2);");
    assert_eq!(math.render(), "(a+1)^2");
}

#[test]
fn test_fenced_gets_implicit_times() {
    let math = from_markup("<math><mn>2</mn><mfenced><mi>x</mi></mfenced></math>");
    assert_eq!(math.render(), "2*(x)");
}

#[test]
fn test_style_and_annotation() {
    let math = from_markup(
        r#"<?xml version="1.0"?>
<math display="block">
  <mstyle>
    <msqrt><mi>x</mi></msqrt>
    <annotation>square root of x</annotation>
  </mstyle>
</math>"#,
    );
    assert_eq!(math.render(), "Math.Sqrt(x)");
    assert_eq!(math.elements(NodeKind::Annotation).len(), 1);
}

#[test]
fn test_unknown_tag() {
    assert_eq!(
        Math::from_markup("<math><mtable/></math>"),
        Err(CodecError::UnknownTag("mtable".to_string()))
    );
}

#[test]
fn test_arity_mismatch() {
    assert_eq!(
        Math::from_markup("<math><msup><mi>a</mi></msup></math>"),
        Err(CodecError::ArityMismatch {
            tag: "msup".to_string(),
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn test_broken_markup() {
    assert!(matches!(
        Math::from_markup("<math><mi>a</math>"),
        Err(CodecError::Markup(_))
    ));
}

#[test]
fn test_formula_written_as_markup() {
    let math = Math::from_formula("a^2").unwrap();
    insta::assert_snapshot!(math.to_markup(), @r###"
    <math>
      <msup>
        <mi>a</mi>
        <mn>2</mn>
      </msup>
    </math>
    "###);
}

#[test]
fn test_formula_as_treeviz() {
    let math = Math::from_formula("a/(b+c)").unwrap();
    insta::assert_snapshot!(math.serialize("treeviz").unwrap(), @r###"
    ⧉ Root
    └─ ÷ 2 children
      ├─ 𝑥 a
      └─ ☰ 5 children
        ├─ ± (
        ├─ 𝑥 b
        ├─ ± +
        ├─ 𝑥 c
        └─ ± )
    "###);
}

#[test]
fn test_formula_survives_markup_and_json() {
    for formula in ["a+b*2", "sqrt(x)^2", "2(3+4)", "a/(b/c)^d"] {
        let math = Math::from_formula(formula).unwrap();
        assert_eq!(Math::from_markup(&math.to_markup()).unwrap(), math, "{}", formula);
        let json = math.serialize("json").unwrap();
        assert_eq!(Math::from_json(&json).unwrap(), math, "{}", formula);
    }
}

#[test]
fn test_tag_element_built_by_hand() {
    let element = TagElement::new("math").with_child(
        TagElement::new("mrow")
            .with_child(TagElement::leaf("mi", "n"))
            .with_child(TagElement::leaf("mo", "*"))
            .with_child(TagElement::leaf("mn", "2")),
    );
    let math = Math::from_tag(&element).unwrap();
    assert_eq!(math.to_tag(), element);
    assert_eq!(math.render(), "n*2");
}
