//! Snapping of probe results
//!
//! A probe taken close to the limit point lands near the true limit, and for
//! the limits people actually ask for the error shows up as a long run of
//! `0`s or `9`s in the decimal expansion (`1.9999997`, `0.5000001`). The
//! expansion is cut at the first such run; a run of `9`s rounds the kept
//! digits up by one unit in their last place. For values below one the runs
//! are looked for after the first significant digit.

use crate::numeric::Rational;
use num_bigint::BigInt;
use num_traits::One;

/// Fractional digits inspected for a run
pub const SNAP_DIGITS: usize = 20;

/// Shortest run of equal digits treated as probe error
pub const MIN_RUN: usize = 4;

/// Snap `value` to the decimal it is converging on, if there is one
pub fn snap(value: &Rational) -> Rational {
    if !value.is_finite() {
        return value.clone();
    }

    let magnitude = value.abs();
    let text = magnitude.to_decimal(SNAP_DIGITS);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    // leading zeros of a value below one are not probe error
    let significant = if whole == "0" {
        match fraction.bytes().position(|d| d != b'0') {
            Some(first) => first,
            None => return value.clone(),
        }
    } else {
        0
    };
    let Some((offset, digit)) = find_run(&fraction.as_bytes()[significant..]) else {
        return value.clone();
    };
    let start = significant + offset;

    let kept = format!("{}.{}", whole, &fraction[..start]);
    let Ok(mut snapped) = kept.parse::<Rational>() else {
        return value.clone();
    };
    if digit == b'9' {
        let unit = Rational::new(BigInt::one(), num_traits::pow(BigInt::from(10), start));
        snapped = snapped.add(&unit);
    }

    if value.is_negative() {
        snapped.neg()
    } else {
        snapped
    }
}

/// Start and digit of the first run of at least [`MIN_RUN`] `0`s or `9`s
fn find_run(digits: &[u8]) -> Option<(usize, u8)> {
    let mut start = 0;
    while start < digits.len() {
        let digit = digits[start];
        let len = digits[start..].iter().take_while(|&&d| d == digit).count();
        if (digit == b'0' || digit == b'9') && len >= MIN_RUN {
            return Some((start, digit));
        }
        start += len;
    }
    None
}
