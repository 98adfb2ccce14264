//! Immutable exact fractions
//!
//! A [`Rational`] is a numerator/denominator pair of [`BigInt`]s. Every
//! constructor and every operation funnels through [`Rational::new`], which
//! enforces the canonical form:
//!
//! - `gcd(|numerator|, denominator) == 1` (with `gcd(0, 0) = 0` left alone)
//! - `denominator >= 0`, so the sign always lives in the numerator
//!
//! Equality is structural on the canonical pair. Use [`Rational::compare`] for
//! numeric ordering; it returns `None` whenever `Undefined` is involved.

use super::decimal;
use super::{MAX_ROOT_DEGREE, ROOT_PRECISION_DIGITS};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Exact fraction with infinities and an undefined state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Build a fraction and bring it into canonical form
    pub fn new(numer: BigInt, denom: BigInt) -> Self {
        let (mut numer, mut denom) = if denom.is_negative() {
            (-numer, -denom)
        } else {
            (numer, denom)
        };

        let divisor = numer.gcd(&denom);
        if !divisor.is_zero() && !divisor.is_one() {
            numer /= &divisor;
            denom /= &divisor;
        }

        Rational { numer, denom }
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Rational {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    pub fn from_ratio(numer: i64, denom: i64) -> Self {
        Rational::new(BigInt::from(numer), BigInt::from(denom))
    }

    pub fn zero() -> Self {
        Rational::from_integer(0)
    }

    pub fn one() -> Self {
        Rational::from_integer(1)
    }

    pub fn undefined() -> Self {
        Rational {
            numer: BigInt::zero(),
            denom: BigInt::zero(),
        }
    }

    pub fn infinity() -> Self {
        Rational {
            numer: BigInt::one(),
            denom: BigInt::zero(),
        }
    }

    pub fn neg_infinity() -> Self {
        Rational {
            numer: -BigInt::one(),
            denom: BigInt::zero(),
        }
    }

    /// Convert an `f64` through its shortest decimal representation
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Rational::undefined();
        }
        if value.is_infinite() {
            return if value > 0.0 {
                Rational::infinity()
            } else {
                Rational::neg_infinity()
            };
        }
        format!("{}", value)
            .parse()
            .unwrap_or_else(|_| Rational::undefined())
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_undefined(&self) -> bool {
        self.denom.is_zero() && self.numer.is_zero()
    }

    pub fn is_infinite(&self) -> bool {
        self.denom.is_zero() && !self.numer.is_zero()
    }

    pub fn is_finite(&self) -> bool {
        !self.denom.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero() && !self.denom.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numer.is_one() && self.denom.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    /// `-1`, `0` or `1`; `Undefined` has no sign and yields itself
    pub fn signum(&self) -> Rational {
        if self.is_undefined() {
            return Rational::undefined();
        }
        Rational::from_integer(self.numer.signum())
    }

    pub fn neg(&self) -> Rational {
        Rational {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }

    pub fn abs(&self) -> Rational {
        Rational {
            numer: self.numer.abs(),
            denom: self.denom.clone(),
        }
    }

    /// Swap numerator and denominator (`0` becomes `Infinity`)
    pub fn recip(&self) -> Rational {
        Rational::new(self.denom.clone(), self.numer.clone())
    }

    pub fn add(&self, rhs: &Rational) -> Rational {
        if self.is_undefined() || rhs.is_undefined() {
            return Rational::undefined();
        }
        if self.denom == rhs.denom {
            return Rational::new(&self.numer + &rhs.numer, self.denom.clone());
        }
        Rational::new(
            &self.numer * &rhs.denom + &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }

    pub fn sub(&self, rhs: &Rational) -> Rational {
        self.add(&rhs.neg())
    }

    pub fn mul(&self, rhs: &Rational) -> Rational {
        Rational::new(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }

    pub fn div(&self, rhs: &Rational) -> Rational {
        self.mul(&rhs.recip())
    }

    /// `self - rhs * floor(self / rhs)`; the result takes the divisor's sign
    ///
    /// Non-finite operands and a zero divisor yield `Undefined`.
    pub fn modulo(&self, rhs: &Rational) -> Rational {
        if !self.is_finite() || !rhs.is_finite() || rhs.is_zero() {
            return Rational::undefined();
        }
        let quotient = self.div(rhs);
        let floor = quotient.numer.div_floor(&quotient.denom);
        self.sub(&rhs.mul(&Rational::from_integer(floor)))
    }

    pub fn percent(&self) -> Rational {
        self.mul(&Rational::from_ratio(1, 100))
    }

    /// Raise to a rational power
    ///
    /// Integer exponents are exact. A non-integer exponent `p/q` computes
    /// `self^p` exactly and then approximates its `q`-th root, so the result
    /// is only correct to [`ROOT_PRECISION_DIGITS`] fractional digits.
    pub fn pow(&self, exponent: &Rational) -> Rational {
        if exponent.is_zero() {
            return Rational::one();
        }
        if self.is_undefined() || !exponent.is_finite() {
            return Rational::undefined();
        }
        if exponent.is_integer() {
            return self.powi(&exponent.numer);
        }

        match exponent.denom.to_u32() {
            Some(degree) if degree <= MAX_ROOT_DEGREE => {
                self.powi(&exponent.numer).nth_root(degree)
            }
            _ => Rational::from_f64(self.to_f64().powf(exponent.to_f64())),
        }
    }

    /// Integer power by squaring, applied to numerator and denominator separately
    pub fn powi(&self, exponent: &BigInt) -> Rational {
        if exponent.is_negative() {
            return self.powi(&-exponent).recip();
        }
        match exponent.to_u64() {
            Some(e) => Rational::new(pow_by_squaring(&self.numer, e), pow_by_squaring(&self.denom, e)),
            None => Rational::undefined(),
        }
    }

    /// Approximate `degree`-th root via Newton's method on the decimal expansion
    pub fn nth_root(&self, degree: u32) -> Rational {
        if degree == 0 || self.is_undefined() {
            return Rational::undefined();
        }
        if degree == 1 || self.is_zero() {
            return self.clone();
        }
        let negative = self.is_negative();
        if negative && degree % 2 == 0 {
            return Rational::undefined();
        }
        if self.is_infinite() {
            return self.clone();
        }

        let magnitude = self.abs();
        if degree > MAX_ROOT_DEGREE {
            let root = Rational::from_f64(magnitude.to_f64().powf(1.0 / f64::from(degree)));
            return if negative { root.neg() } else { root };
        }

        let numer_root = decimal::integer_nth_root(&magnitude.numer, degree);
        let denom_root = decimal::integer_nth_root(&magnitude.denom, degree);
        let root = if numer_root.pow(degree) == magnitude.numer
            && denom_root.pow(degree) == magnitude.denom
        {
            // perfect powers stay exact
            Rational::new(numer_root, denom_root)
        } else {
            decimal::root_digits(
                &magnitude.numer,
                &magnitude.denom,
                degree,
                ROOT_PRECISION_DIGITS,
            )
            .and_then(|text| text.parse().ok())
            .unwrap_or_else(Rational::undefined)
        };
        if negative {
            root.neg()
        } else {
            root
        }
    }

    pub fn floor(&self) -> Rational {
        if !self.is_finite() {
            return self.clone();
        }
        Rational::from_integer(self.numer.div_floor(&self.denom))
    }

    pub fn ceil(&self) -> Rational {
        self.neg().floor().neg()
    }

    /// Round half away from zero
    pub fn round(&self) -> Rational {
        if !self.is_finite() {
            return self.clone();
        }
        let half = Rational::from_ratio(1, 2);
        if self.is_negative() {
            self.neg().add(&half).floor().neg()
        } else {
            self.add(&half).floor()
        }
    }

    /// Numeric ordering, `None` when either side is `Undefined`
    pub fn compare(&self, other: &Rational) -> Option<Ordering> {
        if self.is_undefined() || other.is_undefined() {
            return None;
        }
        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => Some(self.numer.cmp(&other.numer)),
            (true, false) => Some(if self.is_negative() {
                Ordering::Less
            } else {
                Ordering::Greater
            }),
            (false, true) => Some(if other.is_negative() {
                Ordering::Greater
            } else {
                Ordering::Less
            }),
            (false, false) => Some((&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))),
        }
    }

    /// Total order used for sorting: `-Infinity < finite < Infinity < Undefined`
    pub fn total_cmp(&self, other: &Rational) -> Ordering {
        match (self.is_undefined(), other.is_undefined()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.compare(other).unwrap_or(Ordering::Equal),
        }
    }

    /// Truncated decimal expansion with exactly `digits` fractional digits
    pub fn to_decimal(&self, digits: usize) -> String {
        if let Some(name) = self.special_name() {
            return name.to_string();
        }
        decimal::format_truncated(&self.numer, &self.denom, digits)
    }

    /// Exact decimal text when the expansion terminates
    pub fn to_exact_decimal(&self) -> Option<String> {
        if let Some(name) = self.special_name() {
            return Some(name.to_string());
        }
        decimal::format_exact(&self.numer, &self.denom)
    }

    pub fn to_f64(&self) -> f64 {
        match self.special_name() {
            Some(_) if self.is_undefined() => f64::NAN,
            Some(_) if self.is_negative() => f64::NEG_INFINITY,
            Some(_) => f64::INFINITY,
            None => self
                .to_decimal(super::APPROXIMATION_DIGITS)
                .parse()
                .unwrap_or(f64::NAN),
        }
    }

    fn special_name(&self) -> Option<&'static str> {
        if !self.denom.is_zero() {
            None
        } else if self.numer.is_zero() {
            Some("Undefined")
        } else if self.numer.is_negative() {
            Some("-Infinity")
        } else {
            Some("Infinity")
        }
    }
}

fn pow_by_squaring(base: &BigInt, mut exponent: u64) -> BigInt {
    let mut result = BigInt::one();
    let mut square = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= &square;
        }
        exponent >>= 1;
        if exponent > 0 {
            square = &square * &square;
        }
    }
    result
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.special_name() {
            return write!(f, "{}", name);
        }
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_integer(n)
    }
}
