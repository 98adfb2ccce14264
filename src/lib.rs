//! # Introduction
//!
//! exacta evaluates expressions over exact rational numbers and first-class
//! functions. Every expression is normalized by a term-rewriting pipeline
//! before a tail-call-safe tree walker evaluates it.
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Expr → literal check → Rewriter → Interpreter → Value
//! ```
//!
//! 1. [`syntax`]: the expression tree a parser hands over, its canonical
//!    order and an infix `Display`.
//! 2. [`rewrite`]: negatives, leveling, rational simplification, canonical
//!    order and constant folding, iterated to a fixpoint.
//! 3. [`interpreter`]: environments, the built-in table, and calls through a
//!    trampoline so tail recursion runs in constant native stack.
//! 4. [`value`]: runtime values and the operator algebra they share; anything
//!    that is not a number is lifted pointwise.
//! 5. [`numeric`]: the [`Rational`] kernel with `Infinity`/`Undefined` as
//!    ordinary values.
//! 6. [`limit`]: numerical one- and two-sided limits on top of the evaluator.
//!
//! Parsing, the interactive loop and plotting live outside this crate.
//!
//! ## Example
//!
//! ```
//! use exacta::{Expr, Interpreter};
//!
//! let mut interp = Interpreter::default();
//! let third = Expr::div(Expr::int(1), Expr::int(3));
//! let sixth = Expr::div(Expr::int(1), Expr::int(6));
//! let result = interp.run(&Expr::add(third, sixth)).unwrap();
//! assert_eq!(result.to_string(), "1/2");
//! ```

pub mod interpreter;
pub mod limit;
pub mod numeric;
pub mod rewrite;
pub mod syntax;
pub mod value;

pub use interpreter::{
    BuiltinTable, CaptureMode, DefinitionLookup, ErrorKind, EvalConfig, Interpreter,
    RuntimeError,
};
pub use limit::Approach;
pub use numeric::Rational;
pub use rewrite::{RewritePass, Rewriter};
pub use syntax::{AcOp, BinOp, Case, Expr, Predicate, UnOp};
pub use value::{ForeignValue, Function, Value};
