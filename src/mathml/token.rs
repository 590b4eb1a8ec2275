//! Token definitions for infix formulas
//!
//! Formulas are split on whitespace and on operator characters; operators are
//! self-delimiting, everything else between them is one word. Classification of
//! a word into a number or an identifier happens later, when nodes are built.
//! The tokens are defined using the logos derive macro.

use crate::mathml::ast::Operator;
use logos::Logos;

/// Function names a formula may call; each must be followed by `(`
pub const SUPPORTED_FUNCTIONS: [&str; 1] = ["sqrt"];

pub fn is_supported_function(text: &str) -> bool {
    SUPPORTED_FUNCTIONS.contains(&text)
}

/// All possible tokens in a formula
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum Token {
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Times,
    #[token("/")]
    Divide,
    #[token("^")]
    Caret,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    // Identifiers, numbers, function names and anything the validator must reject
    #[regex(r"[^\s+\-*/^()]+")]
    Word,
}

impl Token {
    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Token::Plus => Some(Operator::Plus),
            Token::Minus => Some(Operator::Minus),
            Token::Times => Some(Operator::Times),
            Token::Divide => Some(Operator::Divide),
            Token::Caret => Some(Operator::Caret),
            Token::OpenParen => Some(Operator::OpenParen),
            Token::CloseParen => Some(Operator::CloseParen),
            Token::Word => None,
        }
    }
}

/// Tokenize a formula, pairing each token with its byte range
pub fn tokenize(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

/// Split a formula into its trimmed, non-empty token texts
pub fn split_formula(source: &str) -> Vec<&str> {
    tokenize(source)
        .into_iter()
        .map(|(_, span)| source[span].trim())
        .filter(|text| !text.is_empty())
        .collect()
}
