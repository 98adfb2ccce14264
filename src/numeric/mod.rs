//! Exact numeric kernel
//!
//! This module provides the number type every arithmetic result flows through:
//! - [`rational`]: [`Rational`], an immutable fraction over arbitrary-precision
//!   integers kept in canonical form after every operation
//! - [`decimal`]: decimal-string parsing and formatting, plus the integer
//!   Newton iteration behind fractional powers
//!
//! # Special Values
//!
//! Division by zero never fails. The denominator `0` encodes the three
//! non-finite states:
//!
//! | numerator | denominator | meaning     |
//! |-----------|-------------|-------------|
//! | `0`       | `0`         | `Undefined` |
//! | `1`       | `0`         | `Infinity`  |
//! | `-1`      | `0`         | `-Infinity` |
//!
//! Arithmetic chains propagate these as ordinary values.
//!
//! # Approximation Boundary
//!
//! Every operation is exact except raising to a non-integer exponent, which
//! takes an nth root at [`ROOT_PRECISION_DIGITS`] decimal digits and turns the
//! truncated expansion back into a fraction. `2 ^ (1/2)` is therefore a
//! 40-digit approximation of √2, not √2. Roots of degree above
//! [`MAX_ROOT_DEGREE`] (`2 ^ 0.000001`) go through `f64` instead and keep only
//! double precision; a negative base is `Undefined` there.

pub mod decimal;
pub mod rational;

pub use decimal::ParseRationalError;
pub use rational::Rational;

/// Fractional digits kept when an nth root is approximated
pub const ROOT_PRECISION_DIGITS: usize = 40;

/// Largest root degree taken by Newton's iteration
pub const MAX_ROOT_DEGREE: u32 = 64;

/// Fractional digits used when a value crosses into `f64`
pub const APPROXIMATION_DIGITS: usize = 30;

/// Largest decimal exponent accepted in a literal (`1e4096`)
pub const MAX_LITERAL_EXPONENT: i64 = 4096;
