use std::f64::consts;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{anychar, char},
    combinator::{map, map_opt, value},
    IResult,
};

use crate::{parse_float_literal, EvalError, Operator};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    /// Resolved to a [`crate::Function`] at evaluation time
    Function(String),
    LeftParen,
    RightParen,
}

#[derive(Clone)]
enum Lexeme<'a> {
    Token(Token),
    Literal(&'a str),
}

const SYMBOLS: &str = "+-*/^()";

fn identifier(name: &str) -> Token {
    match name {
        "pi" => Token::Number(consts::PI),
        "e" => Token::Number(consts::E),
        _ => Token::Function(name.to_string()),
    }
}

fn lexeme(i: &str) -> IResult<&str, Lexeme<'_>> {
    alt((
        map(map_opt(anychar, Operator::from_symbol), |op| {
            Lexeme::Token(Token::Operator(op))
        }),
        value(Lexeme::Token(Token::LeftParen), char('(')),
        value(Lexeme::Token(Token::RightParen), char(')')),
        map(take_while1(char::is_alphabetic), |name| {
            Lexeme::Token(identifier(name))
        }),
        map(
            take_while1(|c: char| !c.is_whitespace() && !SYMBOLS.contains(c)),
            Lexeme::Literal,
        ),
    ))(i)
}

/// Splits `input` into tokens, resolving constants and numeric literals.
///
/// Any literal that is not a canonical integer fails the whole input.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let (remaining, lexeme) =
            lexeme(rest).map_err(|_| EvalError::InvalidLiteral(rest.to_string()))?;

        tokens.push(match lexeme {
            Lexeme::Token(token) => token,
            Lexeme::Literal(literal) => Token::Number(parse_float_literal(literal)?),
        });
        rest = remaining.trim_start();
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() -> Result<(), Box<dyn std::error::Error>> {
        let tokens = tokenize("(0x10 + 2) * sqrt(9)")?;
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                Token::Number(16.),
                Token::Operator(Operator::Add),
                Token::Number(2.),
                Token::RightParen,
                Token::Operator(Operator::Mul),
                Token::Function("sqrt".to_string()),
                Token::LeftParen,
                Token::Number(9.),
                Token::RightParen,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_whitespace() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(tokenize("1-2")?, tokenize(" 1 \t-\n 2 ")?);
        assert!(tokenize("   ")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_constants() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            tokenize("pi^e")?,
            vec![
                Token::Number(consts::PI),
                Token::Operator(Operator::Pow),
                Token::Number(consts::E),
            ]
        );
        assert_eq!(tokenize("pie")?, vec![Token::Function("pie".to_string())]);
        Ok(())
    }

    #[test]
    fn test_identifier_splits_from_digits() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            tokenize("abc123")?,
            vec![Token::Function("abc".to_string()), Token::Number(123.)]
        );
        Ok(())
    }

    #[test]
    fn test_invalid_literal() {
        assert_eq!(
            tokenize("1 + 2x"),
            Err(EvalError::InvalidLiteral("2x".to_string()))
        );
        assert_eq!(
            tokenize("1.5*2"),
            Err(EvalError::InvalidLiteral("1.5".to_string()))
        );
        assert!(tokenize("3 % 2").is_err());
    }

    #[test]
    fn test_wide_literal() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            tokenize("99999999999999999999 - 1")?,
            vec![
                Token::Number(1e20),
                Token::Operator(Operator::Sub),
                Token::Number(1.)
            ]
        );
        Ok(())
    }
}
