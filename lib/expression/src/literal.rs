use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, one_of},
    combinator::{all_consuming, map, opt, recognize},
    multi::separated_list1,
    sequence::{pair, preceded},
    IResult,
};

use crate::EvalError;

/// A run of digits in `radix`, with single underscores allowed between digits
fn digits<'a>(radix: u32) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    recognize(separated_list1(
        char('_'),
        take_while1(move |c: char| c.is_digit(radix)),
    ))
}

fn payload(i: &str) -> IResult<&str, (u32, &str)> {
    alt((
        map(preceded(tag_no_case("0b"), digits(2)), |d| (2, d)),
        map(preceded(tag_no_case("0o"), digits(8)), |d| (8, d)),
        map(preceded(tag_no_case("0x"), digits(16)), |d| (16, d)),
        map(digits(10), |d| (10, d)),
    ))(i)
}

fn literal(i: &str) -> IResult<&str, (Option<char>, (u32, &str))> {
    all_consuming(pair(opt(one_of("+-")), payload))(i)
}

/// A validated literal: sign, radix and digits with underscores removed
struct Literal {
    negative: bool,
    radix: u32,
    digits: String,
}

fn split(s: &str) -> Result<Literal, EvalError> {
    let invalid = || EvalError::InvalidLiteral(s.to_string());

    let (_, (sign, (radix, digits))) = literal(s).map_err(|_| invalid())?;
    let digits = digits.replace('_', "");

    if radix == 10 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return Err(invalid());
    }

    Ok(Literal {
        negative: sign == Some('-'),
        radix,
        digits,
    })
}

/// Parses a canonical integer literal: an optional sign, then a `0b`, `0o` or
/// `0x` prefixed payload or a plain base-10 one.
///
/// A base-10 payload may only start with `0` if it is all zeros, so `007` is
/// rejected while `0_0` is accepted.
pub fn parse_literal(s: &str) -> Result<i64, EvalError> {
    let Literal {
        negative,
        radix,
        digits,
    } = split(s)?;

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits
    };
    i64::from_str_radix(&signed, radix).map_err(|_| EvalError::InvalidLiteral(s.to_string()))
}

/// Parses a canonical integer literal as the nearest `f64`
///
/// Accepts the same syntax as [`parse_literal`] but has no `i64` bound. Only
/// literals too large for a finite `f64` are rejected.
pub fn parse_float_literal(s: &str) -> Result<f64, EvalError> {
    if let Ok(v) = parse_literal(s) {
        return Ok(v as f64);
    }

    let invalid = || EvalError::InvalidLiteral(s.to_string());
    let Literal {
        negative,
        radix,
        digits,
    } = split(s)?;

    let magnitude = match radix {
        10 => digits.parse::<f64>().map_err(|_| invalid())?,
        _ => digits.chars().try_fold(0., |acc: f64, c| -> Result<f64, EvalError> {
            let digit = c.to_digit(radix).ok_or_else(invalid)?;
            Ok(acc * f64::from(radix) + f64::from(digit))
        })?,
    };

    if !magnitude.is_finite() {
        return Err(invalid());
    }
    Ok(if negative { -magnitude } else { magnitude })
}
