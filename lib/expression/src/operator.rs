use serde::{Deserialize, Serialize};

use crate::EvalError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub fn from_symbol(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 3,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == Operator::Pow
    }

    /// Computes `a OP b`
    pub fn apply(self, a: f64, b: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Sub => Ok(a - b),
            Operator::Mul => Ok(a * b),
            Operator::Div if b == 0.0 => Err(EvalError::DivisionByZero),
            Operator::Div => Ok(a / b),
            Operator::Pow if a == 0.0 && b < 0.0 => Err(EvalError::DivisionByZero),
            Operator::Pow => {
                let r = a.powf(b);
                // Only finite operands are checked, inf^x is left to propagate
                if r.is_finite() || !a.is_finite() || !b.is_finite() {
                    Ok(r)
                } else {
                    Err(EvalError::Domain(format!(
                        "{}^{} is not a finite real number",
                        a, b
                    )))
                }
            }
        }
    }
}
