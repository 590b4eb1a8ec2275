//! Post-processing of emitted text
//!
//! Reduces a full emission to the single-line expression handed back by
//! `render`: the last statement, with `Math.Pow(x, y)` calls written back as
//! `x^y` and line breaks removed.

use once_cell::sync::Lazy;
use regex::Regex;

const POW_CALL: &str = "Math.Pow(";

/// A bare name or literal, e.g. `x1`, `2.5`, `Math.PI`
static SIMPLE_OPERAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w.]+$").unwrap());

/// An optional callee name followed by an opening bracket, e.g. `Math.Sqrt(`
static CALL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w.]*\(").unwrap());

/// The last non-empty `;`-terminated statement, without line breaks
pub fn last_statement(text: &str) -> String {
    let statement = text
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .last()
        .unwrap_or("");
    strip_line_breaks(statement)
}

pub fn strip_line_breaks(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Rewrite every `Math.Pow(base, exponent)` call as `base^exponent`.
///
/// Nested calls are rewritten innermost first. Operands that are not a single
/// name, literal, call or bracketed group are wrapped in brackets. Calls whose
/// brackets or arguments cannot be matched are left as written.
pub fn rewrite_power_calls(text: &str) -> String {
    let mut text = text.to_string();
    let mut search_end = text.len();

    while let Some(start) = text[..search_end].rfind(POW_CALL) {
        let open = start + POW_CALL.len() - 1;
        let rewritten = matching_close(&text, open).and_then(|close| {
            let (base, exponent) = split_arguments(&text[open + 1..close])?;
            Some((close, format!("{}^{}", power_operand(base), power_operand(exponent))))
        });

        match rewritten {
            Some((close, replacement)) => {
                text.replace_range(start..=close, &replacement);
                search_end = text.len();
            }
            None => search_end = start,
        }
    }

    text
}

/// Byte index of the `)` matching the `(` at `open`
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split `base, exponent` at the first top-level comma
fn split_arguments(arguments: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    for (index, c) in arguments.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                let base = arguments[..index].trim();
                let exponent = arguments[index + 1..].trim();
                if base.is_empty() || exponent.is_empty() {
                    return None;
                }
                return Some((base, exponent));
            }
            _ => {}
        }
    }
    None
}

fn power_operand(operand: &str) -> String {
    if is_atomic(operand) {
        operand.to_string()
    } else {
        format!("({})", operand)
    }
}

fn is_atomic(operand: &str) -> bool {
    if SIMPLE_OPERAND.is_match(operand) {
        return true;
    }
    match CALL_PREFIX.find(operand) {
        Some(prefix) => matching_close(operand, prefix.end() - 1) == Some(operand.len() - 1),
        None => false,
    }
}
