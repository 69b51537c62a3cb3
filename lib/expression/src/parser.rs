use crate::{EvalError, Operator, Token};

/// What the previous token left behind, used to tell unary `+`/`-` apart
/// from binary ones
#[derive(Debug, Clone, Copy, PartialEq)]
enum Previous {
    Start,
    Operand,
    Operator,
    LeftParen,
    Function,
}

fn should_pop(top: &Token, incoming: Operator) -> bool {
    match top {
        Token::Operator(top) if incoming.is_right_associative() => {
            top.precedence() > incoming.precedence()
        }
        Token::Operator(top) => top.precedence() >= incoming.precedence(),
        _ => false,
    }
}

/// Reorders infix `tokens` into postfix order with the shunting-yard
/// algorithm.
///
/// A `+` or `-` with no left operand gets a synthetic `0` operand, so `-x`
/// becomes `0 x -`. No other operator is given an implicit operand.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut pending: Vec<Token> = Vec::new();
    let mut previous = Previous::Start;

    for token in tokens {
        match token {
            Token::Number(_) => {
                output.push(token);
                previous = Previous::Operand;
            }
            Token::Operator(op) => {
                let unary = matches!(op, Operator::Add | Operator::Sub)
                    && matches!(
                        previous,
                        Previous::Start | Previous::Operator | Previous::LeftParen
                    );

                if unary {
                    output.push(Token::Number(0.));
                } else {
                    while pending.last().map_or(false, |top| should_pop(top, op)) {
                        output.extend(pending.pop());
                    }
                }
                pending.push(token);
                previous = Previous::Operator;
            }
            Token::Function(_) => {
                pending.push(token);
                previous = Previous::Function;
            }
            Token::LeftParen => {
                pending.push(token);
                previous = Previous::LeftParen;
            }
            Token::RightParen => {
                loop {
                    match pending.pop() {
                        Some(Token::LeftParen) => break,
                        Some(t) => output.push(t),
                        None => return Err(EvalError::MismatchedParentheses),
                    }
                }
                if let Some(Token::Function(_)) = pending.last() {
                    output.extend(pending.pop());
                }
                previous = Previous::Operand;
            }
        }
    }

    while let Some(t) = pending.pop() {
        match t {
            Token::LeftParen | Token::RightParen => return Err(EvalError::MismatchedParentheses),
            t => output.push(t),
        }
    }
    Ok(output)
}
