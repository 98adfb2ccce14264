// Evaluation engine for rewritten expression trees

use crate::interpreter::builtins::{BuiltinTable, DefinitionLookup};
use crate::interpreter::config::{CaptureMode, EvalConfig};
use crate::interpreter::environment::{EnvRef, Environment};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::trampoline::CallOutcome;
use crate::numeric::Rational;
use crate::rewrite::Rewriter;
use crate::syntax::{Expr, Predicate};
use crate::value::{Closure, Function, Value};
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// State shared by an interpreter and every child created for a call
pub(crate) struct Context {
    pub(crate) builtins: BuiltinTable,
    pub(crate) lookup: Option<Box<dyn DefinitionLookup>>,
    pub(crate) config: EvalConfig,
    /// Current depth of non-tail calls
    pub(crate) depth: Cell<usize>,
}

/// Tree-walking evaluator
///
/// Each call of a closure runs in a child interpreter whose environment is the
/// closure's captured scope extended with the parameters. Children share the
/// built-in table, the external lookup and the configuration.
pub struct Interpreter {
    /// Local bindings
    env: EnvRef,

    pub(crate) context: Rc<Context>,
}

impl Interpreter {
    pub fn new(config: EvalConfig) -> Self {
        Self::build(config, None)
    }

    /// Interpreter that consults `lookup` after local bindings miss and
    /// before the built-in table
    pub fn with_lookup(config: EvalConfig, lookup: impl DefinitionLookup + 'static) -> Self {
        Self::build(config, Some(Box::new(lookup)))
    }

    fn build(config: EvalConfig, lookup: Option<Box<dyn DefinitionLookup>>) -> Self {
        Interpreter {
            env: Environment::new().into_ref(),
            context: Rc::new(Context {
                builtins: BuiltinTable::standard(),
                lookup,
                config,
                depth: Cell::new(0),
            }),
        }
    }

    pub(crate) fn child(&self, env: EnvRef) -> Interpreter {
        Interpreter {
            env,
            context: Rc::clone(&self.context),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.context.config
    }

    /// Evaluate one top-level expression
    ///
    /// Literals are checked before anything runs, then the tree is normalized
    /// (unless disabled in the configuration) and evaluated. A failure leaves
    /// earlier assignments in place and does not affect the next call.
    pub fn run(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        validate_literals(expr)?;

        let config = &self.context.config;
        if config.rewrite {
            let normalized = Rewriter::default_pipeline()
                .with_max_rounds(config.max_rewrite_rounds)
                .normalize(expr);
            self.evaluate(&normalized)
        } else {
            self.evaluate(expr)
        }
    }

    /// Evaluate a tree as given, without rewriting it first
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        debug!("evaluating {}", expr);
        self.context.depth.set(0);
        self.eval_expr(expr)
    }

    /// Local binding of `name`, ignoring the external lookup and built-ins
    pub fn binding(&self, name: &str) -> Option<Value> {
        self.env.borrow().get(name)
    }

    /// Bind a host-provided value in the top-level environment
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.env.borrow_mut().define(name, value);
    }

    pub(crate) fn resolve(&self, name: &str) -> Result<Value, RuntimeError> {
        if let Some(value) = self.env.borrow().get(name) {
            return Ok(value);
        }
        if let Some(value) = self
            .context
            .lookup
            .as_ref()
            .and_then(|lookup| lookup.lookup(name))
        {
            return Ok(value);
        }
        self.context
            .builtins
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Reduce an expression to a value
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number(text) => Ok(Value::Number(text.parse::<Rational>()?)),

            Expr::Variable(name) => self.resolve(name),

            // Both binding forms write into the current scope
            Expr::Assign { name, value, .. } => {
                let value = self.eval_expr(value)?;
                self.env.borrow_mut().define(name.clone(), value.clone());
                Ok(value)
            }

            Expr::Function { params, body } => Ok(self.make_closure(params, body)),

            Expr::PartialApply { bound, callee } => {
                let bound = self.eval_all(bound)?;
                let callee = self.eval_expr(callee)?;
                Ok(Value::function(Function::Partial { bound, callee }))
            }

            Expr::Unary { operand, op, .. } => self.evaluate_unary_op(*op, operand),

            Expr::Binary { lhs, rhs, op } => self.evaluate_binary_op(*op, lhs, rhs),

            Expr::Commutative { operands, op } => self.evaluate_commutative(*op, operands),

            Expr::Unit => Ok(Value::Unit),

            Expr::Foreign(leaf) => Ok(Value::Foreign(Rc::clone(&leaf.0))),

            Expr::Apply { .. } | Expr::Piecewise(_) | Expr::Block(_) => {
                match self.eval_tail(expr)? {
                    CallOutcome::Done(value) => Ok(value),
                    CallOutcome::TailCall { callee, args } => self.call_value(&callee, args),
                }
            }
        }
    }

    /// Evaluate an expression in tail position
    ///
    /// A call in tail position is not performed here; it is handed back as
    /// [`CallOutcome::TailCall`] for the trampoline to run once the current
    /// frame is gone.
    pub(crate) fn eval_tail(&mut self, expr: &Expr) -> Result<CallOutcome, RuntimeError> {
        match expr {
            Expr::Apply { callee, args } => {
                let callee = self.eval_expr(callee)?;
                let args = self.eval_all(args)?;
                Ok(CallOutcome::TailCall { callee, args })
            }

            Expr::Piecewise(cases) => {
                for case in cases {
                    let matched = match &case.predicate {
                        Predicate::Otherwise => true,
                        Predicate::When(predicate) => self.eval_expr(predicate)?.is_truthy(),
                    };
                    if matched {
                        return self.eval_tail(&case.action);
                    }
                }
                Err(RuntimeError::NonExhaustivePiecewise { cases: cases.len() })
            }

            Expr::Block(exprs) => {
                let Some((last, leading)) = exprs.split_last() else {
                    return Ok(CallOutcome::Done(Value::Unit));
                };
                for expr in leading {
                    self.eval_expr(expr)?;
                }
                self.eval_tail(last)
            }

            _ => Ok(CallOutcome::Done(self.eval_expr(expr)?)),
        }
    }

    fn eval_all(&mut self, exprs: &[Expr]) -> Result<Vec<Value>, RuntimeError> {
        exprs.iter().map(|expr| self.eval_expr(expr)).collect()
    }

    fn make_closure(&self, params: &[String], body: &Expr) -> Value {
        let env = match self.context.config.capture_mode {
            CaptureMode::Live => Rc::clone(&self.env),
            CaptureMode::Snapshot => self.env.borrow().flatten().into_ref(),
        };
        Value::function(Function::Closure(Closure {
            params: params.to_vec(),
            body: Rc::new(body.clone()),
            env,
        }))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}

/// Reject the first literal that is not a number
fn validate_literals(expr: &Expr) -> Result<(), RuntimeError> {
    expr.try_for_each_literal(&mut |text: &str| {
        text.parse::<Rational>()
            .map(|_| ())
            .map_err(RuntimeError::from)
    })
}
