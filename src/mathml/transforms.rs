//! Transform pipeline infrastructure
//!
//! The formula parser is a chain of small stages, each turning one value into
//! the next: text into a flat node stream, the stream into bracket groups,
//! groups into folded operators, and finally into a `Root` node.
//!
//! # Architecture Overview
//!
//! ## 1. The `Runnable` Trait
//!
//! The interface of every stage. Any type implementing `Runnable<I, O>` can
//! transform input of type `I` to output of type `O`:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, TransformError>;
//! }
//! ```
//!
//! ## 2. The `Transform<I, O>` Type
//!
//! A wrapper that enables composition. Any `Runnable` can be chained onto a
//! `Transform` with `.then()`; the compiler checks that each stage's input type
//! matches the previous output type:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Tokenization::new())     // String → Vec<Node>
//!     .then(BracketGrouping::new()); // Vec<Node> → Vec<Node>
//! ```
//!
//! ## 3. Static Lazy Transforms
//!
//! The standard pipelines are pre-built as statics using `once_cell::sync::Lazy`.
//! See the [`standard`] module.
//!
//! # Module Organization
//!
//! - [`stages`]: Individual stages (tokenization, grouping, folding, elimination, assembly)
//! - [`standard`]: Pre-built transform combinations

pub mod stages;
pub mod standard;

use std::fmt;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A `)` with no matching `(`; `position` is the token index of the `)`
    MalformedBrackets { position: usize },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::MalformedBrackets { position } => {
                write!(f, "Unmatched closing bracket at token {}", position)
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Trait for anything that can transform an input to an output
///
/// This is implemented by individual transformation stages.
/// The `Transform` struct composes multiple `Runnable` implementations.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline
///
/// `Transform<I, O>` represents a transformation from type `I` to type `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Add a stage to this transform, returning a new transform with extended output type
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built static transform onto this one
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

// Implement Runnable for Transform so transforms can be used as stages
impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountWords;
    impl Runnable<String, usize> for CountWords {
        fn run(&self, input: String) -> Result<usize, TransformError> {
            Ok(input.split_whitespace().count())
        }
    }

    struct RejectZero;
    impl Runnable<usize, usize> for RejectZero {
        fn run(&self, input: usize) -> Result<usize, TransformError> {
            if input == 0 {
                Err(TransformError::MalformedBrackets { position: 0 })
            } else {
                Ok(input)
            }
        }
    }

    #[test]
    fn test_type_changing_chain() {
        let transform = Transform::from_fn(|s: String| Ok(s))
            .then(CountWords)
            .then(RejectZero);
        assert_eq!(transform.run("a + b".to_string()).unwrap(), 3);
    }

    #[test]
    fn test_error_short_circuits() {
        let transform = Transform::from_fn(|s: String| Ok(s))
            .then(CountWords)
            .then(RejectZero);
        assert_eq!(
            transform.run(String::new()),
            Err(TransformError::MalformedBrackets { position: 0 })
        );
    }

    #[test]
    fn test_malformed_brackets_display() {
        let err = TransformError::MalformedBrackets { position: 3 };
        assert_eq!(err.to_string(), "Unmatched closing bracket at token 3");
    }
}
