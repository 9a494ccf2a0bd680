//! Opaque numeric provider backing every `Number` node
//!
//! Field operations are exact rational arithmetic; `pow` with an integer
//! exponent stays exact, while fractional exponents and the trigonometric
//! functions bridge through `f64`. Decimal literals parse losslessly
//! (`123.456` is the exact rational `15432/125`).

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, ToPrimitive, Zero};

use crate::error::MathError;

/// Exact scalar value used throughout the expression tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scalar(BigRational);

impl Scalar {
    /// The additive identity
    pub fn zero() -> Self {
        Scalar(BigRational::zero())
    }

    /// The multiplicative identity
    pub fn one() -> Self {
        Scalar(BigRational::one())
    }

    /// Build a scalar from an integer
    pub fn from_integer(n: i64) -> Self {
        Scalar(BigRational::from_integer(BigInt::from(n)))
    }

    /// Parse a decimal literal losslessly
    ///
    /// Accepts exactly `DIGIT+ ( '.' DIGIT+ )?`; anything else (including
    /// `"."`, `"1."` and `".5"`) is rejected with `MalformedNumber`.
    pub fn parse_literal(text: &str) -> Result<Self, MathError> {
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, fr)) => (i, Some(fr)),
            None => (text, None),
        };

        let digits_only = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(int_part) || !frac_part.map_or(true, digits_only) {
            return Err(MathError::malformed_number(text));
        }

        let mut digits = String::with_capacity(text.len());
        digits.push_str(int_part);
        let mut scale = 0u32;
        if let Some(fr) = frac_part {
            digits.push_str(fr);
            scale = fr.len() as u32;
        }

        let numer = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| MathError::malformed_number(text))?;
        let denom = BigInt::from(10).pow(scale);
        Ok(Scalar(BigRational::new(numer, denom)))
    }

    /// True if the value is a whole number
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Equality against an integer literal
    pub fn eq_integer(&self, n: i64) -> bool {
        self.0.is_integer() && *self.0.numer() == BigInt::from(n)
    }

    /// True if the value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact division; division by zero is a domain error
    pub fn div(&self, rhs: &Scalar) -> Result<Scalar, MathError> {
        if rhs.0.is_zero() {
            return Err(MathError::numeric_domain("division by zero"));
        }
        Ok(Scalar(&self.0 / &rhs.0))
    }

    /// Exponentiation
    ///
    /// Integer exponents are computed exactly; fractional exponents go
    /// through `f64::powf`. `0^0` follows IEEE powf behavior and yields 1.
    pub fn pow(&self, exp: &Scalar) -> Result<Scalar, MathError> {
        if exp.0.is_integer() {
            if let Some(e) = exp.0.numer().to_i32() {
                if self.0.is_zero() && e < 0 {
                    return Err(MathError::numeric_domain("zero raised to a negative power"));
                }
                return Ok(Scalar(self.0.clone().pow(e)));
            }
        }
        let base = self.to_f64()?;
        let e = exp.to_f64()?;
        Scalar::from_f64(base.powf(e))
    }

    pub fn sin(&self) -> Result<Scalar, MathError> {
        Scalar::from_f64(self.to_f64()?.sin())
    }

    pub fn cos(&self) -> Result<Scalar, MathError> {
        Scalar::from_f64(self.to_f64()?.cos())
    }

    pub fn tan(&self) -> Result<Scalar, MathError> {
        Scalar::from_f64(self.to_f64()?.tan())
    }

    pub fn csc(&self) -> Result<Scalar, MathError> {
        let s = self.to_f64()?.sin();
        if s == 0.0 {
            return Err(MathError::numeric_domain("csc undefined: sin is zero"));
        }
        Scalar::from_f64(1.0 / s)
    }

    pub fn sec(&self) -> Result<Scalar, MathError> {
        let c = self.to_f64()?.cos();
        if c == 0.0 {
            return Err(MathError::numeric_domain("sec undefined: cos is zero"));
        }
        Scalar::from_f64(1.0 / c)
    }

    pub fn cot(&self) -> Result<Scalar, MathError> {
        let t = self.to_f64()?.tan();
        if t == 0.0 {
            return Err(MathError::numeric_domain("cot undefined: tan is zero"));
        }
        Scalar::from_f64(1.0 / t)
    }

    /// Bridge into floating point for the transcendental functions
    pub fn to_f64(&self) -> Result<f64, MathError> {
        match self.0.to_f64() {
            Some(f) if f.is_finite() => Ok(f),
            _ => Err(MathError::numeric_domain(
                "value is not representable as a finite float",
            )),
        }
    }

    /// Bridge back from floating point, rejecting non-finite results
    pub fn from_f64(f: f64) -> Result<Scalar, MathError> {
        if !f.is_finite() {
            return Err(MathError::numeric_domain(
                "operation produced a non-finite value",
            ));
        }
        BigRational::from_float(f)
            .map(Scalar)
            .ok_or_else(|| MathError::numeric_domain("operation produced a non-finite value"))
    }
}

impl<'b> Add<&'b Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar(&self.0 + &rhs.0)
    }
}

impl<'b> Sub<&'b Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &'b Scalar) -> Scalar {
        Scalar(&self.0 - &rhs.0)
    }
}

impl<'b> Mul<&'b Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar(&self.0 * &rhs.0)
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar(-&self.0)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}
