//! Decimal text in and out of the kernel
//!
//! Number literals reach the kernel as decimal strings, and every approximate
//! result (nth roots, `f64` built-ins) is re-entered the same way, so there is
//! exactly one path from digits to fractions.

use super::rational::Rational;
use super::MAX_LITERAL_EXPONENT;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::str::FromStr;

/// Error returned when text is not a decimal number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRationalError {
    pub text: String,
    pub reason: &'static str,
}

impl fmt::Display for ParseRationalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a number: {}", self.text, self.reason)
    }
}

impl std::error::Error for ParseRationalError {}

impl FromStr for Rational {
    type Err = ParseRationalError;

    /// Parse `[sign] digits [. digits] [e [sign] digits]` or one of
    /// `Infinity`, `-Infinity`, `Undefined`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ParseRationalError {
            text: text.to_string(),
            reason,
        };

        match text {
            "Infinity" | "+Infinity" => return Ok(Rational::infinity()),
            "-Infinity" => return Ok(Rational::neg_infinity()),
            "Undefined" => return Ok(Rational::undefined()),
            _ => {}
        }

        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            Some(_) => (false, text),
            None => return Err(fail("empty literal")),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => {
                let exponent: i64 = rest[pos + 1..]
                    .parse()
                    .map_err(|_| fail("malformed exponent"))?;
                (&rest[..pos], exponent)
            }
            None => (rest, 0),
        };
        if exponent.abs() > MAX_LITERAL_EXPONENT {
            return Err(fail("exponent out of range"));
        }

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(fail("no digits"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(fail("unexpected character"));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let mut numer: BigInt = digits.parse().map_err(|_| fail("no digits"))?;
        if negative {
            numer = -numer;
        }

        let scale = exponent - frac_part.len() as i64;
        let power = BigInt::from(10).pow(scale.unsigned_abs() as u32);
        if scale >= 0 {
            Ok(Rational::from_integer(numer * power))
        } else {
            Ok(Rational::new(numer, power))
        }
    }
}

/// `numer/denom` truncated to exactly `digits` fractional digits
///
/// `denom` must be positive.
pub fn format_truncated(numer: &BigInt, denom: &BigInt, digits: usize) -> String {
    let magnitude = numer.abs();
    let (int_part, remainder) = magnitude.div_rem(denom);
    let mut out = String::new();
    if numer.is_negative() {
        out.push('-');
    }
    out.push_str(&int_part.to_string());
    if digits > 0 {
        let scaled = remainder * BigInt::from(10).pow(digits as u32) / denom;
        out.push('.');
        out.push_str(&format!("{:0>width$}", scaled, width = digits));
    }
    out
}

/// Exact decimal text, or `None` when the denominator has a prime factor other
/// than 2 or 5
pub fn format_exact(numer: &BigInt, denom: &BigInt) -> Option<String> {
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let mut rest = denom.clone();
    let mut twos = 0usize;
    let mut fives = 0usize;
    while rest.is_even() && !rest.is_zero() {
        rest /= &two;
        twos += 1;
    }
    while (&rest % &five).is_zero() && !rest.is_zero() {
        rest /= &five;
        fives += 1;
    }
    if !rest.is_one() {
        return None;
    }
    let digits = twos.max(fives);
    let text = format_truncated(numer, denom, digits);
    Some(text)
}

/// Largest `r` with `r^degree <= value`, by Newton's iteration
///
/// Starts from a power of two above the root so the iterates decrease
/// monotonically until they stop moving.
pub fn integer_nth_root(value: &BigInt, degree: u32) -> BigInt {
    if degree <= 1 || value < &BigInt::from(2) {
        return value.clone();
    }
    let n = BigInt::from(degree);
    let bits = value.bits();
    let mut x = BigInt::one() << bits.div_ceil(degree as u64);
    loop {
        let y = ((&n - 1u32) * &x + value / x.pow(degree - 1)) / &n;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Decimal text of `(numer/denom)^(1/degree)` truncated to `digits` places
///
/// `None` when `digits * degree` does not fit a `u32`.
pub fn root_digits(numer: &BigInt, denom: &BigInt, degree: u32, digits: usize) -> Option<String> {
    let digits_u32 = u32::try_from(digits).ok()?;
    let shift = BigInt::from(10).pow(digits_u32.checked_mul(degree)?);
    let scaled = numer * shift / denom;
    let root = integer_nth_root(&scaled, degree);
    Some(format_truncated(&root, &BigInt::from(10).pow(digits_u32), digits))
}
