//! Expression evaluator
//!
//! This module turns rewritten expression trees into values:
//! - [`engine`]: [`Interpreter`], the tree walker and its entry points
//! - [`trampoline`]: call dispatch and the tail-call loop
//! - [`environment`]: lexical scopes shared by closures
//! - [`builtins`]: the built-in table and the external lookup hook
//! - [`config`]: capture mode, depth limit and rewrite settings
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! [`Interpreter::run`] handles one top-level expression at a time: literals
//! are validated, the tree is normalized by the rewrite pipeline, and the
//! result is evaluated in the interpreter's top-level environment, which
//! persists between calls.
//!
//! Names resolve through local scopes first, then the host's
//! [`DefinitionLookup`], then the [`BuiltinTable`].
//!
//! Operator evaluation (`ops`) is split out as additional `impl Interpreter`
//! blocks.

pub mod builtins;
pub mod config;
pub mod constants;
pub mod engine;
pub mod environment;
pub mod errors;
mod ops;
pub mod trampoline;

pub use builtins::{BuiltinTable, DefinitionLookup};
pub use config::{CaptureMode, EvalConfig};
pub use engine::Interpreter;
pub use environment::{EnvRef, Environment};
pub use errors::{ErrorKind, RuntimeError};
pub use trampoline::CallOutcome;
