use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum EvalError {
    #[display(fmt = "Invalid literal: {}", _0)]
    InvalidLiteral(String),

    #[display(fmt = "Mismatched parentheses")]
    MismatchedParentheses,

    #[display(fmt = "Invalid expression")]
    InvalidExpression,

    #[display(fmt = "Unknown function: {}", _0)]
    UnknownFunction(String),

    #[display(fmt = "Domain error: {}", _0)]
    Domain(String),

    #[display(fmt = "Division by zero")]
    DivisionByZero,
}

impl std::error::Error for EvalError {}
