//! Callable values
//!
//! Every callable the evaluator can produce is one [`Function`] variant. The
//! variants other than [`Function::Closure`] and [`Function::Builtin`] are
//! built by the value algebra itself: partial application, composition and
//! the two pointwise lifts.

use super::Value;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::errors::RuntimeError;
use crate::syntax::{BinOp, Expr, UnOp};
use std::fmt;
use std::rc::Rc;

/// Native implementation of a built-in
pub type BuiltinFn = fn(&mut Interpreter, &[Value]) -> Result<Value, RuntimeError>;

/// Accepted argument counts of a built-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    pub fn minimum(self) -> usize {
        match self {
            Arity::Exact(n) | Arity::AtLeast(n) => n,
        }
    }
}

/// Function created by evaluating an anonymous function node
#[derive(Clone)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: Rc<Expr>,
    pub env: EnvRef,
}

impl fmt::Debug for Closure {
    // The environment may contain this closure; never print it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum Function {
    Closure(Closure),
    Builtin(Builtin),
    /// `bound ++ rest` is passed to `callee`
    Partial { bound: Vec<Value>, callee: Value },
    /// `x -> outer(inner(x))`
    Composed { outer: Value, inner: Value },
    /// `x -> lhs(x) op rhs(x)`
    LiftedBinary { op: BinOp, lhs: Value, rhs: Value },
    /// `x -> op operand(x)`
    LiftedUnary { op: UnOp, operand: Value },
}

impl Function {
    /// Name used in error messages
    pub fn describe(&self) -> String {
        match self {
            Function::Closure(closure) => format!("closure({})", closure.params.join(", ")),
            Function::Builtin(builtin) => builtin.name.to_string(),
            Function::Partial { bound, .. } => format!("partial application of {} argument(s)", bound.len()),
            Function::Composed { .. } => "composition".to_string(),
            Function::LiftedBinary { op, .. } => format!("lifted '{}'", op.symbol()),
            Function::LiftedUnary { op, .. } => format!("lifted '{}'", op.symbol()),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Closure(closure) => {
                write!(f, "({}) -> {}", closure.params.join(", "), closure.body)
            }
            Function::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
            Function::Partial { bound, callee } => {
                for arg in bound {
                    write!(f, "{}:", arg)?;
                }
                write!(f, "{}", callee)
            }
            Function::Composed { outer, inner } => write!(f, "({} . {})", outer, inner),
            Function::LiftedBinary { op, lhs, rhs } => {
                write!(f, "({} {} {})", lhs, op.symbol(), rhs)
            }
            Function::LiftedUnary { op: UnOp::Percent, operand } => write!(f, "({}%)", operand),
            Function::LiftedUnary { op, operand } => write!(f, "({}{})", op.symbol(), operand),
        }
    }
}
