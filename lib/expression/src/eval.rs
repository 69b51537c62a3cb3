use crate::{EvalError, Function, Token};

/// Fails with a domain error unless `value` is finite
fn finite(value: f64, step: impl FnOnce() -> String) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Domain(format!(
            "{} is not a finite real number",
            step()
        )))
    }
}

/// Evaluates a postfix token sequence produced by [`crate::to_postfix`]
///
/// Every value pushed onto the stack is finite, so a non-finite operator or
/// function result is always a domain error.
pub fn evaluate_postfix(postfix: &[Token]) -> Result<f64, EvalError> {
    let mut values: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(v) => values.push(*v),
            Token::Operator(op) => {
                let (b, a) = match (values.pop(), values.pop()) {
                    (Some(b), Some(a)) => (b, a),
                    _ => return Err(EvalError::InvalidExpression),
                };
                let value = op.apply(a, b)?;
                values.push(finite(value, || format!("{} {} {}", a, op.symbol(), b))?);
            }
            Token::Function(name) => {
                let x = values.pop().ok_or(EvalError::InvalidExpression)?;
                let function: Function = name
                    .parse()
                    .map_err(|_| EvalError::UnknownFunction(name.clone()))?;
                let value = function.apply(x)?;
                values.push(finite(value, || format!("{}({})", function.name(), x))?);
            }
            Token::LeftParen | Token::RightParen => return Err(EvalError::MismatchedParentheses),
        }
    }

    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::InvalidExpression),
    }
}
