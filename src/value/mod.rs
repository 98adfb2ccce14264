//! Runtime value representation
//!
//! This module defines the [`Value`] enum and the operation set every value
//! supports (the value algebra, see [`algebra`]).
//!
//! # Value Types
//!
//! - [`Value::Number`]: exact [`Rational`], including the non-finite states
//! - [`Value::Function`]: closures, built-ins and the callables the algebra
//!   builds (partial applications, compositions, lifted operators)
//! - [`Value::Unit`]: absorbing null-like value; every operation on it yields
//!   `Unit` and it is never truthy
//! - [`Value::Foreign`]: matrix/atom values owned by an external collaborator
//!
//! # Lifting
//!
//! Numbers override arithmetic directly. Everything else falls back to
//! pointwise lifting: `f + g` is the callable `x -> f(x) + g(x)`, so callables
//! form a ring over the number algebra.

pub mod algebra;
pub mod foreign;
pub mod function;

pub use foreign::{ForeignValue, Side};
pub use function::{Arity, Builtin, BuiltinFn, Closure, Function};

use crate::numeric::Rational;
use std::fmt;
use std::rc::Rc;

/// Runtime values in the interpreter
#[derive(Debug, Clone)]
pub enum Value {
    Number(Rational),
    Function(Rc<Function>),
    Unit,
    Foreign(Rc<dyn ForeignValue>),
}

impl Value {
    pub fn number(value: i64) -> Self {
        Value::Number(Rational::from_integer(value))
    }

    pub fn from_bool(flag: bool) -> Self {
        Value::Number(Rational::from_integer(if flag { 1 } else { 0 }))
    }

    pub fn function(function: Function) -> Self {
        Value::Function(Rc::new(function))
    }

    /// Kind name used in dispatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Function(_) => "function",
            Value::Unit => "unit",
            Value::Foreign(foreign) => foreign.kind(),
        }
    }

    /// Get the number, returns None if not a Number
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Numbers are truthy when defined and non-zero; Unit never is
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_zero() && !n.is_undefined(),
            Value::Function(_) => true,
            Value::Unit => false,
            Value::Foreign(foreign) => foreign.is_truthy(),
        }
    }
}

impl PartialEq for Value {
    /// Numbers compare structurally; callables and foreign values by identity
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Unit, Value::Unit) => true,
            (Value::Foreign(a), Value::Foreign(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Rational> for Value {
    fn from(value: Rational) -> Self {
        Value::Number(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Function(function) => write!(f, "{}", function),
            Value::Unit => f.write_str("()"),
            Value::Foreign(foreign) => f.write_str(&foreign.render()),
        }
    }
}
