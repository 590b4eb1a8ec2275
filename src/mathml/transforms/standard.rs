//! Standard transform definitions
//!
//! Pre-built formula pipelines, defined as statics using `once_cell::sync::Lazy`.

use crate::mathml::ast::Node;
use crate::mathml::transforms::stages::{
    Assembly, BracketElimination, BracketGrouping, FunctionFolding, OperatorFolding, Tokenization,
};
use crate::mathml::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for the node-stream transforms
pub type NodeStreamTransform = Transform<String, Vec<Node>>;

/// Type alias for the full formula transform
pub type FormulaTransform = Transform<String, Node>;

/// Tokenization transform: String → Vec<Node>
///
/// Flat leaves only; no grouping.
pub static TOKENIZATION: Lazy<NodeStreamTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization::new()));

/// Grouped transform: String → Vec<Node>
///
/// 1. Tokenization
/// 2. Bracket grouping
pub static GROUPED: Lazy<NodeStreamTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&TOKENIZATION).then(BracketGrouping::new()));

/// Formula to AST transform: String → Node
///
/// The complete parser:
/// 1. Tokenization
/// 2. Bracket grouping
/// 3. Operator folding (to fixpoint)
/// 4. Function folding (top level)
/// 5. Bracket elimination (to fixpoint)
/// 6. Assembly into a `Root`
///
/// Formulas should be checked with [`crate::mathml::validation::is_valid`]
/// first; an unmatched `)` fails with `MalformedBrackets`.
pub static FORMULA_TO_AST: Lazy<FormulaTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&GROUPED)
        .then(OperatorFolding::new())
        .then(FunctionFolding::new())
        .then(BracketElimination::new())
        .then(Assembly::new())
});
