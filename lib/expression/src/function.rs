use strum_macros::EnumString;

use crate::EvalError;

/// Largest `n` whose factorial is still a finite `f64`
const MAX_FACTORIAL: f64 = 170.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Function {
    Sqrt,
    #[strum(serialize = "fac", serialize = "factorial")]
    Factorial,
    Abs,
    Floor,
    Ceil,
    Exp,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    #[strum(serialize = "log")]
    Log10,
    #[strum(serialize = "ln")]
    Ln,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Factorial => "factorial",
            Function::Abs => "abs",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Exp => "exp",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Log10 => "log",
            Function::Ln => "ln",
        }
    }

    pub fn apply(self, x: f64) -> Result<f64, EvalError> {
        match self {
            Function::Sqrt if x < 0.0 => Err(self.domain("not defined for negative values")),
            Function::Sqrt => Ok(x.sqrt()),
            Function::Factorial => self.factorial(x),
            Function::Abs => Ok(x.abs()),
            Function::Floor => Ok(x.floor()),
            Function::Ceil => Ok(x.ceil()),
            Function::Exp => Ok(x.exp()),
            Function::Sin => Ok(x.sin()),
            Function::Cos => Ok(x.cos()),
            Function::Tan => Ok(x.tan()),
            Function::Asin | Function::Acos if !(-1.0..=1.0).contains(&x) => {
                Err(self.domain("domain is [-1, 1]"))
            }
            Function::Asin => Ok(x.asin()),
            Function::Acos => Ok(x.acos()),
            Function::Atan => Ok(x.atan()),
            Function::Log10 | Function::Ln if x <= 0.0 => {
                Err(self.domain("not defined for non-positive values"))
            }
            Function::Log10 => Ok(x.log10()),
            Function::Ln => Ok(x.ln()),
        }
    }

    /// The operand is truncated toward zero before the product is taken
    fn factorial(self, x: f64) -> Result<f64, EvalError> {
        let n = x.trunc();
        if !n.is_finite() || n < 0.0 {
            return Err(self.domain("not defined for negative values"));
        }
        if n > MAX_FACTORIAL {
            return Err(self.domain("overflows for values above 170"));
        }
        Ok((1..=n as u32).fold(1.0, |acc, k| acc * f64::from(k)))
    }

    fn domain(self, reason: &str) -> EvalError {
        EvalError::Domain(format!("{}() {}", self.name(), reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("sqrt".parse::<Function>()?, Function::Sqrt);
        assert_eq!("fac".parse::<Function>()?, Function::Factorial);
        assert_eq!("factorial".parse::<Function>()?, Function::Factorial);
        assert_eq!("log".parse::<Function>()?, Function::Log10);
        assert_eq!("ln".parse::<Function>()?, Function::Ln);
        assert_eq!("acos".parse::<Function>()?, Function::Acos);

        assert!("log10".parse::<Function>().is_err());
        assert!("Sqrt".parse::<Function>().is_err());
        assert!("pie".parse::<Function>().is_err());
        Ok(())
    }

    #[test]
    fn test_factorial() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Function::Factorial.apply(0.)?, 1.);
        assert_eq!(Function::Factorial.apply(5.)?, 120.);
        assert_eq!(Function::Factorial.apply(4.9)?, 24.);
        assert_eq!(Function::Factorial.apply(-0.5)?, 1.);
        assert!(Function::Factorial.apply(170.)?.is_finite());

        assert_eq!(
            Function::Factorial.apply(-2.),
            Err(EvalError::Domain(
                "factorial() not defined for negative values".to_string()
            ))
        );
        assert!(Function::Factorial.apply(171.).is_err());
        assert!(Function::Factorial.apply(f64::NAN).is_err());
        assert!(Function::Factorial.apply(f64::INFINITY).is_err());
        Ok(())
    }

    #[test]
    fn test_domains() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Function::Sqrt.apply(9.)?, 3.);
        assert_eq!(Function::Asin.apply(1.)?, std::f64::consts::FRAC_PI_2);
        assert_eq!(Function::Acos.apply(1.)?, 0.);
        assert_eq!(Function::Log10.apply(100.)?, 2.);
        assert_eq!(Function::Ln.apply(1.)?, 0.);

        assert!(Function::Sqrt.apply(-1.).is_err());
        assert!(Function::Asin.apply(2.).is_err());
        assert!(Function::Acos.apply(-1.5).is_err());
        assert!(Function::Log10.apply(0.).is_err());
        assert!(Function::Ln.apply(-3.).is_err());
        Ok(())
    }

    #[test]
    fn test_total_functions() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Function::Abs.apply(-2.5)?, 2.5);
        assert_eq!(Function::Floor.apply(-2.5)?, -3.);
        assert_eq!(Function::Ceil.apply(2.1)?, 3.);
        assert_eq!(Function::Exp.apply(0.)?, 1.);
        assert_eq!(Function::Sin.apply(0.)?, 0.);
        assert_eq!(Function::Cos.apply(0.)?, 1.);
        assert_eq!(Function::Tan.apply(0.)?, 0.);
        assert_eq!(Function::Atan.apply(0.)?, 0.);
        assert!(Function::Exp.apply(1000.)?.is_infinite());
        Ok(())
    }
}
