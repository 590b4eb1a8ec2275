//! # mathml-cs
//!
//! Converts a small math language into linear C#-style expression code.
//!
//! Input comes either as a MathML-like tagged tree or as an infix formula such
//! as `a+b*2`. Both are turned into the same typed AST, which is then emitted
//! together with the declarations the emitted code needs.
//!
//! Layout
//!
//! src/mathml
//!   ├── ast          Node model shared by everything else
//!   ├── token        Formula tokenizer (logos)
//!   ├── transforms   Formula parser as a chain of tree-rewrite stages
//!   ├── validation   Syntax gate run before parsing
//!   ├── formats      Tag-tree codec, markup reader/writer and output formats
//!   ├── emitting     Build context, visitor and render post-processing
//!   └── math         The `Math` facade tying the above together
//!
//! For assertion helpers used in tests, see the [testing module](mathml::testing).

pub mod mathml;

pub use mathml::math::Math;
