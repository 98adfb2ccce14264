//! Runtime error types for the evaluator
//!
//! This module defines [`RuntimeError`], which represents every error that can
//! occur while one top-level expression is evaluated. Numeric trouble
//! (division by zero, `0/0`) is not an error: the kernel returns
//! `Infinity`/`Undefined` values instead.
//!
//! All runtime errors are local to the expression being evaluated; the host is
//! expected to report them and carry on with the next expression.
//! [`RuntimeError::kind`] groups the variants into the four categories a host
//! needs to tell apart.

use crate::numeric::ParseRationalError;
use crate::syntax::BinOp;
use crate::value::Value;
use std::fmt;

/// Coarse error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation unsupported for the operand's kind, or wrong argument count
    Dispatch,
    /// Unbound name, or a piecewise function with no matching case
    UndefinedHandle,
    /// Literal text that is not a number
    MalformedLiteral,
    /// Non-tail recursion went past the configured depth
    StackExhaustion,
}

/// Runtime errors that can occur during evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Value of this kind cannot be called
    NotCallable { kind: String, arity: usize },

    /// Function argument count mismatch
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    /// Comparison between values that have no ordering
    NotOrdered {
        operation: String,
        left: String,
        right: String,
    },

    /// Built-in received an argument it cannot work with
    InvalidArgument { function: String, message: String },

    /// Undefined variable reference
    UndefinedVariable { name: String },

    /// No case of a piecewise function matched
    NonExhaustivePiecewise { cases: usize },

    /// Literal text that does not parse as a number
    MalformedLiteral { text: String, reason: String },

    /// Call depth limit reached
    StackExhausted { depth: usize, limit: usize },
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::NotCallable { .. }
            | RuntimeError::ArgumentCountMismatch { .. }
            | RuntimeError::NotOrdered { .. }
            | RuntimeError::InvalidArgument { .. } => ErrorKind::Dispatch,
            RuntimeError::UndefinedVariable { .. } | RuntimeError::NonExhaustivePiecewise { .. } => {
                ErrorKind::UndefinedHandle
            }
            RuntimeError::MalformedLiteral { .. } => ErrorKind::MalformedLiteral,
            RuntimeError::StackExhausted { .. } => ErrorKind::StackExhaustion,
        }
    }

    pub(crate) fn not_ordered(op: BinOp, left: &Value, right: &Value) -> Self {
        RuntimeError::NotOrdered {
            operation: op.symbol().to_string(),
            left: left.kind().to_string(),
            right: right.kind().to_string(),
        }
    }

    pub(crate) fn not_callable(value: &Value, arity: usize) -> Self {
        RuntimeError::NotCallable {
            kind: value.kind().to_string(),
            arity,
        }
    }

    pub(crate) fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        RuntimeError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::NotCallable { kind, arity } => {
                write!(
                    f,
                    "Cannot call {} with {} argument{}",
                    kind,
                    arity,
                    if *arity == 1 { "" } else { "s" }
                )
            }
            RuntimeError::ArgumentCountMismatch {
                function,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Function '{}' expects {} argument{}, got {}",
                    function,
                    expected,
                    if *expected == 1 { "" } else { "s" },
                    got
                )
            }
            RuntimeError::NotOrdered {
                operation,
                left,
                right,
            } => {
                write!(
                    f,
                    "Cannot compare {} {} {}: values are not ordered",
                    left, operation, right
                )
            }
            RuntimeError::InvalidArgument { function, message } => {
                write!(f, "Invalid argument to '{}': {}", function, message)
            }
            RuntimeError::UndefinedVariable { name } => {
                write!(f, "Undefined variable '{}'", name)
            }
            RuntimeError::NonExhaustivePiecewise { cases } => {
                write!(
                    f,
                    "Non-exhaustive piecewise: none of {} case{} matched",
                    cases,
                    if *cases == 1 { "" } else { "s" }
                )
            }
            RuntimeError::MalformedLiteral { text, reason } => {
                write!(f, "Malformed number literal '{}': {}", text, reason)
            }
            RuntimeError::StackExhausted { depth, limit } => {
                write!(
                    f,
                    "Stack exhausted at call depth {} (limit is {})",
                    depth, limit
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ParseRationalError> for RuntimeError {
    fn from(err: ParseRationalError) -> Self {
        RuntimeError::MalformedLiteral {
            text: err.text,
            reason: err.reason.to_string(),
        }
    }
}
