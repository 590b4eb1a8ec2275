//! AST definitions for math expressions
//!
//! The tree is a closed sum type ([`Node`]). Every variant is owned by exactly one
//! parent; there is no sharing and no cycles. Parsing and the tag codec both
//! produce this tree, the emitter consumes it.
//!
//! ## Modules
//!
//! - `node` - Node, operator and kind definitions plus structural accessors
//! - `traits` - Uniform labelling used by the tree visualisation

pub mod node;
pub mod traits;

pub use node::{Arity, Descendants, Node, NodeKind, Operator};
pub use traits::AstNode;
