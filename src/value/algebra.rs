//! The value algebra
//!
//! Dispatch for every operator a value supports:
//!
//! - arithmetic (`+ - * / mod ^`) and the unary `+x`, `-x`, `x%`
//! - composition (`f . g`)
//! - comparisons, which need both operands ordered
//! - truthiness-based `and` / `or`
//!
//! Calling is not here: it needs an evaluator and lives in the trampoline
//! driver ([`crate::interpreter::trampoline`]).
//!
//! # Dispatch Order
//!
//! 1. `Unit` on either side absorbs the operation.
//! 2. Two numbers use the rational kernel directly.
//! 3. A foreign operand gets a chance to override.
//! 4. Anything else is lifted pointwise into a new callable.

use super::{Function, Side, Value};
use crate::interpreter::errors::RuntimeError;
use crate::numeric::Rational;
use crate::syntax::{BinOp, UnOp};
use std::cmp::Ordering;

/// Apply an arithmetic operator to two numbers
///
/// Callers only pass arithmetic operators; anything else yields `Undefined`.
pub fn apply_arithmetic(op: BinOp, a: &Rational, b: &Rational) -> Rational {
    match op {
        BinOp::Add => a.add(b),
        BinOp::Sub => a.sub(b),
        BinOp::Mul => a.mul(b),
        BinOp::Div => a.div(b),
        BinOp::Mod => a.modulo(b),
        BinOp::Pow => a.pow(b),
        _ => Rational::undefined(),
    }
}

pub fn apply_unary(op: UnOp, a: &Rational) -> Rational {
    match op {
        UnOp::Positive => a.clone(),
        UnOp::Negate => a.neg(),
        UnOp::Percent => a.percent(),
    }
}

fn lift_binary(op: BinOp, lhs: &Value, rhs: &Value) -> Value {
    Value::function(Function::LiftedBinary {
        op,
        lhs: lhs.clone(),
        rhs: rhs.clone(),
    })
}

impl Value {
    /// Dispatch any binary operator except the short-circuit evaluation of
    /// `and` / `or`, which the evaluator performs before reaching here
    pub fn binary_op(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Compose => Ok(Value::compose(lhs, rhs)),
            BinOp::And | BinOp::Or => Ok(Value::select_logical(op, lhs, rhs)),
            _ if op.is_comparison() => Value::compare_op(op, lhs, rhs),
            _ => Value::arithmetic_op(op, lhs, rhs),
        }
    }

    fn arithmetic_op(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
        match (lhs, rhs) {
            (Value::Unit, _) | (_, Value::Unit) => Ok(Value::Unit),
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply_arithmetic(op, a, b))),
            (Value::Foreign(foreign), _) => {
                foreign
                    .binary(op, rhs, Side::Left)
                    .unwrap_or_else(|| Ok(lift_binary(op, lhs, rhs)))
            }
            (_, Value::Foreign(foreign)) => {
                foreign
                    .binary(op, lhs, Side::Right)
                    .unwrap_or_else(|| Ok(lift_binary(op, lhs, rhs)))
            }
            _ => Ok(lift_binary(op, lhs, rhs)),
        }
    }

    pub fn unary_op(op: UnOp, operand: &Value) -> Result<Value, RuntimeError> {
        match operand {
            Value::Unit => Ok(Value::Unit),
            Value::Number(n) => Ok(Value::Number(apply_unary(op, n))),
            Value::Foreign(foreign) => foreign.unary(op).unwrap_or_else(|| {
                Ok(Value::function(Function::LiftedUnary {
                    op,
                    operand: operand.clone(),
                }))
            }),
            Value::Function(_) => Ok(Value::function(Function::LiftedUnary {
                op,
                operand: operand.clone(),
            })),
        }
    }

    /// `x -> outer(inner(x))`
    pub fn compose(outer: &Value, inner: &Value) -> Value {
        if outer.is_unit() || inner.is_unit() {
            return Value::Unit;
        }
        Value::function(Function::Composed {
            outer: outer.clone(),
            inner: inner.clone(),
        })
    }

    /// Comparisons yield `1` or `0`; `Undefined` is unordered, so only `!=`
    /// holds for it
    pub fn compare_op(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
        let ordering = match (lhs, rhs) {
            (Value::Unit, _) | (_, Value::Unit) => return Ok(Value::Unit),
            (Value::Number(a), Value::Number(b)) => a.compare(b),
            (Value::Foreign(foreign), _) => Some(
                foreign
                    .compare(rhs)
                    .ok_or_else(|| RuntimeError::not_ordered(op, lhs, rhs))?,
            ),
            (_, Value::Foreign(foreign)) => Some(
                foreign
                    .compare(lhs)
                    .ok_or_else(|| RuntimeError::not_ordered(op, lhs, rhs))?
                    .reverse(),
            ),
            _ => return Err(RuntimeError::not_ordered(op, lhs, rhs)),
        };

        let holds = match (op, ordering) {
            (BinOp::Ne, None) => true,
            (_, None) => false,
            (BinOp::Eq, Some(ord)) => ord == Ordering::Equal,
            (BinOp::Ne, Some(ord)) => ord != Ordering::Equal,
            (BinOp::Lt, Some(ord)) => ord == Ordering::Less,
            (BinOp::Le, Some(ord)) => ord != Ordering::Greater,
            (BinOp::Gt, Some(ord)) => ord == Ordering::Greater,
            (BinOp::Ge, Some(ord)) => ord != Ordering::Less,
            _ => false,
        };
        Ok(Value::from_bool(holds))
    }

    /// `a and b` yields `a` when it is falsy, otherwise `b`; `or` mirrors it
    pub fn select_logical(op: BinOp, lhs: &Value, rhs: &Value) -> Value {
        let take_left = match op {
            BinOp::And => !lhs.is_truthy(),
            _ => lhs.is_truthy(),
        };
        if take_left {
            lhs.clone()
        } else {
            rhs.clone()
        }
    }

    pub fn add(&self, rhs: &Value) -> Result<Value, RuntimeError> {
        Value::binary_op(BinOp::Add, self, rhs)
    }

    pub fn sub(&self, rhs: &Value) -> Result<Value, RuntimeError> {
        Value::binary_op(BinOp::Sub, self, rhs)
    }

    pub fn mul(&self, rhs: &Value) -> Result<Value, RuntimeError> {
        Value::binary_op(BinOp::Mul, self, rhs)
    }

    pub fn div(&self, rhs: &Value) -> Result<Value, RuntimeError> {
        Value::binary_op(BinOp::Div, self, rhs)
    }

    pub fn modulo(&self, rhs: &Value) -> Result<Value, RuntimeError> {
        Value::binary_op(BinOp::Mod, self, rhs)
    }

    pub fn pow(&self, rhs: &Value) -> Result<Value, RuntimeError> {
        Value::binary_op(BinOp::Pow, self, rhs)
    }

    pub fn negate(&self) -> Result<Value, RuntimeError> {
        Value::unary_op(UnOp::Negate, self)
    }

    pub fn positive(&self) -> Result<Value, RuntimeError> {
        Value::unary_op(UnOp::Positive, self)
    }

    pub fn percent(&self) -> Result<Value, RuntimeError> {
        Value::unary_op(UnOp::Percent, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: i64) -> Value {
        Value::number(value)
    }

    #[test]
    fn test_numbers_use_direct_arithmetic() {
        assert_eq!(n(2).add(&n(3)).unwrap(), n(5));
        assert_eq!(n(1).div(&n(4)).unwrap(), Value::Number(Rational::from_ratio(1, 4)));
        assert_eq!(n(50).percent().unwrap(), Value::Number(Rational::from_ratio(1, 2)));
    }

    #[test]
    fn test_unit_absorbs_everything() {
        assert_eq!(Value::Unit.add(&n(1)).unwrap(), Value::Unit);
        assert_eq!(n(1).pow(&Value::Unit).unwrap(), Value::Unit);
        assert_eq!(Value::Unit.negate().unwrap(), Value::Unit);
        assert_eq!(Value::compare_op(BinOp::Lt, &Value::Unit, &n(1)).unwrap(), Value::Unit);
        assert!(!Value::Unit.is_truthy());
    }

    #[test]
    fn test_comparisons_yield_numbers() {
        assert_eq!(Value::compare_op(BinOp::Lt, &n(1), &n(2)).unwrap(), n(1));
        assert_eq!(Value::compare_op(BinOp::Ge, &n(1), &n(2)).unwrap(), n(0));
        let undefined = Value::Number(Rational::undefined());
        assert_eq!(Value::compare_op(BinOp::Eq, &undefined, &undefined).unwrap(), n(0));
        assert_eq!(Value::compare_op(BinOp::Ne, &undefined, &undefined).unwrap(), n(1));
    }

    #[test]
    fn test_logical_selection() {
        assert_eq!(Value::select_logical(BinOp::And, &n(0), &n(5)), n(0));
        assert_eq!(Value::select_logical(BinOp::And, &n(2), &n(5)), n(5));
        assert_eq!(Value::select_logical(BinOp::Or, &n(2), &n(5)), n(2));
        assert_eq!(Value::select_logical(BinOp::Or, &Value::Unit, &n(5)), n(5));
    }

    #[test]
    fn test_truthiness_of_numbers() {
        assert!(n(3).is_truthy());
        assert!(!n(0).is_truthy());
        assert!(!Value::Number(Rational::undefined()).is_truthy());
        assert!(Value::Number(Rational::neg_infinity()).is_truthy());
    }
}
