//! Numeric values
//!
//! Integer arithmetic stays exact while it fits in `i64` and falls back to
//! `f64` on overflow. Division always produces a real.

use core::fmt::{self, Write};
use core::ops::{Add, Mul, Neg, Sub};

use heapless::String;

use super::error::EvalError;

/// Result of an arithmetic expression
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Real(r) => r,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Real(r) => r.is_finite(),
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Real(r) => r == 0.0,
        }
    }

    /// True division; the result is always real
    pub fn checked_div(self, rhs: Number) -> Result<Number, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Number::Real(self.as_f64() / rhs.as_f64()))
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map_or(Number::Real(a as f64 + b as f64), Number::Int),
            (a, b) => Number::Real(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(b)
                .map_or(Number::Real(a as f64 - b as f64), Number::Int),
            (a, b) => Number::Real(a.as_f64() - b.as_f64()),
        }
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map_or(Number::Real(a as f64 * b as f64), Number::Int),
            (a, b) => Number::Real(a.as_f64() * b.as_f64()),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Int(i) => i.checked_neg().map_or(Number::Real(-(i as f64)), Number::Int),
            Number::Real(r) => Number::Real(-r),
        }
    }
}

/// Whole-valued reals have no fractional part
fn is_integral(r: f64) -> bool {
    // `f64::fract` needs std; anything at or beyond 2^53 is integral anyway
    if r.abs() >= 9_007_199_254_740_992.0 {
        return true;
    }
    r == (r as i64) as f64
}

impl fmt::Display for Number {
    /// Integers print as-is. Reals print without a decimal point when
    /// whole, otherwise rounded to two places with trailing zeros (and a
    /// bare point) removed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Real(r) if !r.is_finite() => write!(f, "{}", r),
            Number::Real(r) if r == 0.0 => f.write_str("0"),
            Number::Real(r) if is_integral(r) => write!(f, "{:.0}", r),
            Number::Real(r) => {
                // Non-integral, so |r| < 2^53 and the text fits
                let mut buf: String<32> = String::new();
                if write!(buf, "{:.2}", r).is_err() {
                    return write!(f, "{:.2}", r);
                }
                f.write_str(buf.trim_end_matches('0').trim_end_matches('.'))
            }
        }
    }
}
