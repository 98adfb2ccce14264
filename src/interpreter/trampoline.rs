//! Tail-call trampoline
//!
//! Calls never recurse on the native stack for calls in tail position. A
//! closure body is evaluated with [`Interpreter::eval_tail`], which returns
//! [`CallOutcome::TailCall`] instead of performing a call it finds in tail
//! position. [`Interpreter::call_value`] runs the resulting chain in a loop
//! until a plain value comes out.
//!
//! # Call Depth
//!
//! Every entry into [`Interpreter::call_value`] from a non-tail position (an
//! argument, an operand, the inner side of a composition) counts against
//! `max_call_depth`. Bounces of the loop do not.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::RuntimeError;
use crate::value::{Function, Value};
use log::{trace, warn};

/// Result of one step of a call
#[derive(Debug)]
pub enum CallOutcome {
    Done(Value),
    TailCall { callee: Value, args: Vec<Value> },
}

impl Interpreter {
    /// Call `callee` with `args`, running tail calls to completion
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let limit = self.context.config.max_call_depth;
        let depth = self.context.depth.get() + 1;
        if depth > limit {
            warn!("call depth {} exceeds the limit of {}", depth, limit);
            return Err(RuntimeError::StackExhausted { depth, limit });
        }

        self.context.depth.set(depth);
        let result = self.bounce(callee.clone(), args);
        self.context.depth.set(depth - 1);
        result
    }

    fn bounce(&mut self, mut callee: Value, mut args: Vec<Value>) -> Result<Value, RuntimeError> {
        loop {
            match self.call_once(&callee, args)? {
                CallOutcome::Done(value) => return Ok(value),
                CallOutcome::TailCall {
                    callee: next,
                    args: next_args,
                } => {
                    trace!("tail call into {} with {} argument(s)", next.kind(), next_args.len());
                    callee = next;
                    args = next_args;
                }
            }
        }
    }

    /// Perform a single call step
    fn call_once(&mut self, callee: &Value, args: Vec<Value>) -> Result<CallOutcome, RuntimeError> {
        let function = match callee {
            Value::Function(function) => function,
            Value::Unit => return Ok(CallOutcome::Done(Value::Unit)),
            Value::Foreign(foreign) => {
                return match foreign.call(&args) {
                    Some(result) => result.map(CallOutcome::Done),
                    None => Err(RuntimeError::not_callable(callee, args.len())),
                };
            }
            Value::Number(_) => return Err(RuntimeError::not_callable(callee, args.len())),
        };

        match function.as_ref() {
            Function::Closure(closure) => {
                if closure.params.len() != args.len() {
                    return Err(RuntimeError::ArgumentCountMismatch {
                        function: function.describe(),
                        expected: closure.params.len(),
                        got: args.len(),
                    });
                }
                let mut scope = Environment::child(closure.env.clone());
                for (param, arg) in closure.params.iter().zip(args) {
                    scope.define(param.clone(), arg);
                }
                let mut frame = self.child(scope.into_ref());
                frame.eval_tail(&closure.body)
            }

            Function::Builtin(builtin) => {
                if !builtin.arity.accepts(args.len()) {
                    return Err(RuntimeError::ArgumentCountMismatch {
                        function: builtin.name.to_string(),
                        expected: builtin.arity.minimum(),
                        got: args.len(),
                    });
                }
                Ok(CallOutcome::Done((builtin.func)(self, &args)?))
            }

            Function::Partial { bound, callee } => {
                let mut full = bound.clone();
                full.extend(args);
                Ok(CallOutcome::TailCall {
                    callee: callee.clone(),
                    args: full,
                })
            }

            Function::Composed { outer, inner } => {
                let intermediate = self.call_value(inner, args)?;
                Ok(CallOutcome::TailCall {
                    callee: outer.clone(),
                    args: vec![intermediate],
                })
            }

            Function::LiftedBinary { op, lhs, rhs } => {
                let left = self.call_pointwise(lhs, &args)?;
                let right = self.call_pointwise(rhs, &args)?;
                Value::binary_op(*op, &left, &right).map(CallOutcome::Done)
            }

            Function::LiftedUnary { op, operand } => {
                let inner = self.call_pointwise(operand, &args)?;
                Value::unary_op(*op, &inner).map(CallOutcome::Done)
            }
        }
    }

    /// Operand of a lifted operator at `args`; non-callables act as constants
    fn call_pointwise(&mut self, operand: &Value, args: &[Value]) -> Result<Value, RuntimeError> {
        if operand.is_callable() {
            self.call_value(operand, args.to_vec())
        } else {
            Ok(operand.clone())
        }
    }
}
