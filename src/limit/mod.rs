//! Numerical limit approximation
//!
//! Approximates `lim f(x)` as `x` approaches a point, for points where direct
//! evaluation does not give a finite answer.
//!
//! # Algorithm
//!
//! 1. Evaluate `f(a)`. A finite result is the answer.
//! 2. Probe `f(a ± gap)` with `gap` starting at `1/100` and shrinking by a
//!    factor of ten, [`PROBE_ITERATIONS`] times.
//! 3. While the change between successive probes keeps shrinking the probes
//!    are converging. Once it stops shrinking the function is running away,
//!    and the result is an infinity signed by the direction of the last step.
//! 4. A converged probe is snapped with [`rounding::snap`].
//!
//! A two-sided limit approximates each side independently and only succeeds
//! when both are finite and equal; otherwise it is `Undefined`.
//!
//! This is a heuristic. It is exact for rational functions with removable
//! singularities and simple poles and makes no promise beyond that.

pub mod rounding;

use crate::interpreter::{Interpreter, RuntimeError};
use crate::numeric::Rational;
use crate::value::Value;
use log::trace;

/// Number of probes taken on each side
pub const PROBE_ITERATIONS: usize = 5;

/// Which side(s) the point is approached from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    Left,
    Right,
    Both,
}

/// Approximate the limit of `f` at `at`
///
/// Non-numeric results of `f` are returned unchanged from the direct
/// evaluation and rejected when they show up in a probe.
pub fn limit(
    interp: &mut Interpreter,
    f: &Value,
    at: &Rational,
    approach: Approach,
) -> Result<Value, RuntimeError> {
    let direct = interp.call_value(f, vec![Value::Number(at.clone())])?;
    let settled = match &direct {
        Value::Number(n) => n.is_finite(),
        _ => true,
    };
    if settled {
        return Ok(direct);
    }

    let result = match approach {
        Approach::Left => one_sided(interp, f, at, Approach::Left)?,
        Approach::Right => one_sided(interp, f, at, Approach::Right)?,
        Approach::Both => {
            let left = one_sided(interp, f, at, Approach::Left)?;
            let right = one_sided(interp, f, at, Approach::Right)?;
            if left.is_finite() && left == right {
                left
            } else {
                Rational::undefined()
            }
        }
    };
    Ok(Value::Number(result))
}

fn one_sided(
    interp: &mut Interpreter,
    f: &Value,
    at: &Rational,
    side: Approach,
) -> Result<Rational, RuntimeError> {
    let shrink = Rational::from_ratio(1, 10);
    let mut gap = Rational::from_ratio(1, 100);
    let mut previous: Option<Rational> = None;
    let mut last_delta: Option<Rational> = None;

    for _ in 0..PROBE_ITERATIONS {
        let x = match side {
            Approach::Left => at.sub(&gap),
            _ => at.add(&gap),
        };
        let y = probe(interp, f, x)?;
        trace!("limit probe at gap {}: {}", gap, y);
        if !y.is_finite() {
            return Ok(y);
        }

        if let Some(prev) = &previous {
            let delta = y.sub(prev).abs();
            if delta.is_zero() {
                return Ok(rounding::snap(&y));
            }
            if let Some(last) = &last_delta {
                if delta.total_cmp(last).is_ge() {
                    return Ok(if y.total_cmp(prev).is_gt() {
                        Rational::infinity()
                    } else {
                        Rational::neg_infinity()
                    });
                }
            }
            last_delta = Some(delta);
        }

        previous = Some(y);
        gap = gap.mul(&shrink);
    }

    Ok(previous
        .map(|best| rounding::snap(&best))
        .unwrap_or_else(Rational::undefined))
}

fn probe(interp: &mut Interpreter, f: &Value, x: Rational) -> Result<Rational, RuntimeError> {
    match interp.call_value(f, vec![Value::Number(x)])? {
        Value::Number(y) => Ok(y),
        other => Err(RuntimeError::InvalidArgument {
            function: "limit".to_string(),
            message: format!("probe returned {}, expected a number", other.kind()),
        }),
    }
}
