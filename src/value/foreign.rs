//! Extension point for values owned by external collaborators
//!
//! Matrices and string atoms live outside the core. They plug in by
//! implementing [`ForeignValue`]; every operator method returns `None` when
//! the value has no override, and `None` falls back to the same pointwise
//! lifting every other non-numeric value gets.

use super::Value;
use crate::interpreter::errors::RuntimeError;
use crate::syntax::{BinOp, UnOp};
use std::cmp::Ordering;
use std::fmt;

/// Which side of a binary operator the foreign value occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

pub trait ForeignValue: fmt::Debug {
    /// Kind name used in dispatch errors (`"matrix"`, `"atom"`)
    fn kind(&self) -> &'static str;

    fn render(&self) -> String;

    /// Arithmetic override; `other` is the operand on the opposite `side`
    fn binary(
        &self,
        _op: BinOp,
        _other: &Value,
        _side: Side,
    ) -> Option<Result<Value, RuntimeError>> {
        None
    }

    fn unary(&self, _op: UnOp) -> Option<Result<Value, RuntimeError>> {
        None
    }

    /// Ordering against another value; `None` means "not ordered"
    fn compare(&self, _other: &Value) -> Option<Ordering> {
        None
    }

    fn call(&self, _args: &[Value]) -> Option<Result<Value, RuntimeError>> {
        None
    }

    fn is_truthy(&self) -> bool {
        true
    }
}
