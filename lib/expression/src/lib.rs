//! Arithmetic expressions for the counting game.
//!
//! A message is first read as a canonical integer literal (`42`, `0xFF`,
//! `1_000`), and failing that as an expression built from `+ - * / ^`,
//! parentheses, the constants `pi` and `e`, and unary functions such as
//! `sqrt` or `fac`. Expressions are converted to postfix order with the
//! shunting-yard algorithm and evaluated against an explicit value stack.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

pub use error::EvalError;
pub use eval::evaluate_postfix;
pub use function::Function;
pub use literal::{parse_float_literal, parse_literal};
pub use operator::Operator;
pub use parser::to_postfix;
pub use token::{tokenize, Token};

mod error;
mod eval;
mod function;
mod literal;
mod operator;
mod parser;
mod token;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "type", content = "value")]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_float(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Rounds half away from zero, returning `None` if the result does not
    /// fit in an `i64`
    pub fn round(self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i),
            Self::Float(f) => {
                let r = f.round();
                if r.is_finite() && r >= i64::MIN as f64 && r < i64::MAX as f64 {
                    Some(r as i64)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Tokenizes, parses and evaluates `expr`
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(EvalError::InvalidLiteral(String::new()));
    }
    let tokens = tokenize(expr)?;
    let postfix = to_postfix(tokens)?;
    evaluate_postfix(&postfix)
}

/// Removes surrounding whitespace and one pair of surrounding backticks
fn strip(text: &str) -> &str {
    let s = text.trim();
    match s.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        Some(inner) => inner.trim(),
        None => s,
    }
}

/// Reads a chat message as a number.
///
/// Bare integer literals are returned exactly as [`Number::Int`]; anything
/// else goes through [`evaluate`] and comes back as [`Number::Float`]. Every
/// failure collapses to `None`.
pub fn parse_message(text: &str) -> Option<Number> {
    let content = strip(text);
    if content.is_empty() {
        return None;
    }

    if let Ok(v) = parse_literal(content) {
        return Some(Number::Int(v));
    }

    match evaluate(content) {
        Ok(v) => Some(Number::Float(v)),
        Err(e) => {
            debug!("Rejected message {:?}: {}", content, e);
            None
        }
    }
}
