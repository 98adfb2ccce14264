//! Expression trees handed to the core by an external parser
//!
//! - [`ast`]: the closed set of node kinds and their builders
//! - [`order`]: the canonical order used to sort commutative operands
//! - [`display`]: infix rendering for inspection
//!
//! The core never sees source text. A producer builds [`Expr`] values (the
//! builders in [`ast`] make this convenient in tests and embeddings) and the
//! [`crate::interpreter`] takes it from there.

pub mod ast;
pub mod display;
pub mod order;

pub use ast::{AcOp, BinOp, Case, Expr, ForeignLeaf, Predicate, UnOp};
pub use order::{canonical_cmp, sort_canonical};
