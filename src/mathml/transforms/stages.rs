//! Individual transformation stages
//!
//! This module contains the individual stages that can be composed into pipelines.
//! Each stage implements the `Runnable` trait. They run in the order listed here.

pub mod assembly;
pub mod bracket_elimination;
pub mod function_folding;
pub mod grouping;
pub mod operator_folding;
pub mod tokenization;

pub use assembly::Assembly;
pub use bracket_elimination::BracketElimination;
pub use function_folding::FunctionFolding;
pub use grouping::BracketGrouping;
pub use operator_folding::OperatorFolding;
pub use tokenization::Tokenization;
