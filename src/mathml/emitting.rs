//! Code emission
//!
//! Turns a node tree into C#-style statement text. [`visitor`] walks the tree
//! with a [`BuildContext`] and produces the full emission: declarations, then
//! the expression statement. [`post_process`] reduces that to the single-line
//! expression returned by [`crate::Math::render`].

pub mod context;
pub mod post_process;
pub mod visitor;

pub use context::{Accumulator, BuildContext, TokenKind};
pub use post_process::{last_statement, rewrite_power_calls};
pub use visitor::emit;

use std::fmt;

/// Error raised while emitting a tree
#[derive(Debug, Clone, PartialEq)]
pub enum EmitError {
    /// The tree has a shape the emitter cannot write
    EmissionFailure(String),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::EmissionFailure(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EmitError {}
