//! Formula syntax validation
//!
//! A single left-to-right scan over the formula's tokens that accepts or
//! rejects it without building a tree. Formulas it accepts always parse
//! (see [`crate::mathml::transforms::standard::FORMULA_TO_AST`]).
//!
//! A token must be one of: a declared input name, an operator, a supported
//! function name, or a number. Two operators may follow each other only when
//! both are stackable (`+ - ( )`) or one of them is a bracket. A function name
//! must be followed by `(`. Brackets must balance and never close more than
//! was opened. The formula must not end on an operator other than `)`.

use crate::mathml::ast::Operator;
use crate::mathml::token::{is_supported_function, split_formula};
use std::collections::HashSet;
use std::fmt;

/// Why a formula was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A function name not directly followed by `(`
    MissingCallBracket { function: String },
    /// Neither an input, an operator, a function nor a number
    UnknownToken(String),
    /// Two operators in a row that may not be stacked
    StackedOperators { previous: String, current: String },
    /// A character that is neither alphanumeric nor an operator
    InvalidCharacter { token: String, character: char },
    /// A `)` with nothing left to close
    UnopenedBracket,
    /// The formula ends on a function name, an operator, or with open brackets
    IncompleteFormula,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingCallBracket { function } => {
                write!(f, "Function '{}' must be followed by '('", function)
            }
            Rejection::UnknownToken(token) => write!(f, "Unknown token '{}'", token),
            Rejection::StackedOperators { previous, current } => {
                write!(f, "Operator '{}' cannot follow '{}'", current, previous)
            }
            Rejection::InvalidCharacter { token, character } => {
                write!(f, "Invalid character '{}' in '{}'", character, token)
            }
            Rejection::UnopenedBracket => write!(f, "Closing bracket without an opening one"),
            Rejection::IncompleteFormula => write!(f, "Formula is incomplete"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Checks formulas against a fixed set of declared input names
#[derive(Debug, Clone, Default)]
pub struct FormulaValidator {
    inputs: HashSet<String>,
}

impl FormulaValidator {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FormulaValidator {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_valid(&self, formula: &str) -> bool {
        match self.check(formula) {
            Ok(()) => true,
            Err(rejection) => {
                log::debug!("rejected formula {:?}: {}", formula, rejection);
                false
            }
        }
    }

    /// Scan the formula and report the first reason to reject it
    pub fn check(&self, formula: &str) -> Result<(), Rejection> {
        let tokens = split_formula(formula);
        let mut depth: i64 = 0;
        let mut previous: Option<&str> = None;
        let mut previous_was_function = false;

        for &token in &tokens {
            if previous_was_function && token != "(" {
                return Err(Rejection::MissingCallBracket {
                    function: previous.unwrap_or_default().to_string(),
                });
            }

            if !self.is_known_token(token) {
                return Err(Rejection::UnknownToken(token.to_string()));
            }

            if let (Some(before), Some(op)) = (previous, Operator::from_symbol(token)) {
                if let Some(before_op) = Operator::from_symbol(before) {
                    let stackable = before_op.is_stackable() && op.is_stackable();
                    let bracketed = before_op.is_bracket() || op.is_bracket();
                    if !stackable && !bracketed {
                        return Err(Rejection::StackedOperators {
                            previous: before.to_string(),
                            current: token.to_string(),
                        });
                    }
                }
            }

            match Operator::from_symbol(token) {
                Some(Operator::OpenParen) => depth += 1,
                Some(Operator::CloseParen) => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(Rejection::UnopenedBracket);
                    }
                }
                _ => {}
            }

            if let Some(character) = invalid_character(token) {
                return Err(Rejection::InvalidCharacter {
                    token: token.to_string(),
                    character,
                });
            }

            previous_was_function = is_supported_function(token);
            previous = Some(token);
        }

        if previous_was_function {
            return Err(Rejection::IncompleteFormula);
        }

        match previous {
            None => Ok(()),
            Some(last) => {
                let ends_on_value = match Operator::from_symbol(last) {
                    Some(op) => op.is_closing_bracket(),
                    None => true,
                };
                if depth == 0 && ends_on_value {
                    Ok(())
                } else {
                    Err(Rejection::IncompleteFormula)
                }
            }
        }
    }

    fn is_known_token(&self, token: &str) -> bool {
        self.inputs.contains(token)
            || Operator::from_symbol(token).is_some()
            || is_supported_function(token)
            || token.parse::<f64>().is_ok()
    }
}

fn invalid_character(token: &str) -> Option<char> {
    token.chars().find(|&c| {
        let mut buf = [0u8; 4];
        !c.is_alphanumeric() && Operator::from_symbol(c.encode_utf8(&mut buf)).is_none()
    })
}

/// Accept or reject `formula` given the names it may reference
pub fn is_valid<S: AsRef<str>>(formula: &str, inputs: &[S]) -> bool {
    FormulaValidator::new(inputs.iter().map(|s| s.as_ref().to_string())).is_valid(formula)
}
