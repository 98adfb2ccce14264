//! Built-in definitions
//!
//! The [`BuiltinTable`] is the last stop of name resolution, after local
//! bindings and the host's [`DefinitionLookup`]. It is built once per
//! interpreter and shared with every child evaluator.
//!
//! # Supported Built-ins
//!
//! - Constants: `pi`, `e`, `tau`, `Infinity`, `Undefined`, `unit`
//! - Exact: `abs`, `sign`, `floor`, `ceil`, `round`, `numerator`,
//!   `denominator`, `min`, `max`, `sqrt`, `root(x, n)`
//! - Approximate: `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `exp`, `ln`,
//!   `log`
//! - Higher-order: `limit(f, a)`, `limit_left(f, a)`, `limit_right(f, a)`,
//!   `compose(f, g)`
//!
//! # Implementation Notes
//!
//! - `sqrt` and `root` go through the kernel's nth root, so they are exact for
//!   perfect powers and approximate otherwise
//! - The approximate functions round-trip through `f64` and re-enter the
//!   kernel by way of the shortest decimal text of the result
//! - A `unit` argument makes every numeric built-in return `unit`

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::limit::{self, Approach};
use crate::numeric::Rational;
use crate::value::{Arity, Builtin, BuiltinFn, Function, Value};
use num_traits::ToPrimitive;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

const PI: &str = "3.1415926535897932384626433832795028841971693993751";
const E: &str = "2.7182818284590452353602874713526624977572470936999";

/// External definitions consulted after local bindings miss
pub trait DefinitionLookup {
    fn lookup(&self, name: &str) -> Option<Value>;
}

impl DefinitionLookup for FxHashMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<F> DefinitionLookup for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn lookup(&self, name: &str) -> Option<Value> {
        self(name)
    }
}

/// Immutable name → value table of built-ins
pub struct BuiltinTable {
    entries: FxHashMap<&'static str, Value>,
}

impl BuiltinTable {
    pub fn standard() -> Self {
        let mut table = BuiltinTable {
            entries: FxHashMap::default(),
        };

        let pi = parse_constant(PI);
        table.constant("tau", pi.mul(&Rational::from_integer(2)));
        table.constant("pi", pi);
        table.constant("e", parse_constant(E));
        table.constant("Infinity", Rational::infinity());
        table.constant("Undefined", Rational::undefined());
        table.entries.insert("unit", Value::Unit);

        table.function("abs", Arity::Exact(1), builtin_abs);
        table.function("sign", Arity::Exact(1), builtin_sign);
        table.function("floor", Arity::Exact(1), builtin_floor);
        table.function("ceil", Arity::Exact(1), builtin_ceil);
        table.function("round", Arity::Exact(1), builtin_round);
        table.function("numerator", Arity::Exact(1), builtin_numerator);
        table.function("denominator", Arity::Exact(1), builtin_denominator);
        table.function("min", Arity::AtLeast(1), builtin_min);
        table.function("max", Arity::AtLeast(1), builtin_max);
        table.function("sqrt", Arity::Exact(1), builtin_sqrt);
        table.function("root", Arity::Exact(2), builtin_root);

        table.function("sin", Arity::Exact(1), builtin_sin);
        table.function("cos", Arity::Exact(1), builtin_cos);
        table.function("tan", Arity::Exact(1), builtin_tan);
        table.function("asin", Arity::Exact(1), builtin_asin);
        table.function("acos", Arity::Exact(1), builtin_acos);
        table.function("atan", Arity::Exact(1), builtin_atan);
        table.function("exp", Arity::Exact(1), builtin_exp);
        table.function("ln", Arity::Exact(1), builtin_ln);
        table.function("log", Arity::Exact(1), builtin_log);

        table.function("limit", Arity::Exact(2), builtin_limit);
        table.function("limit_left", Arity::Exact(2), builtin_limit_left);
        table.function("limit_right", Arity::Exact(2), builtin_limit_right);
        table.function("compose", Arity::Exact(2), builtin_compose);

        table
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries.get(name).cloned()
    }

    fn constant(&mut self, name: &'static str, value: Rational) {
        self.entries.insert(name, Value::Number(value));
    }

    fn function(&mut self, name: &'static str, arity: Arity, func: BuiltinFn) {
        self.entries.insert(
            name,
            Value::function(Function::Builtin(Builtin { name, arity, func })),
        );
    }
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn parse_constant(text: &str) -> Rational {
    text.parse().unwrap_or_else(|_| Rational::undefined())
}

/// Outcome of reading a numeric argument
enum Numeric<'a> {
    Number(&'a Rational),
    Unit,
}

fn numeric_arg<'a>(name: &str, value: &'a Value) -> Result<Numeric<'a>, RuntimeError> {
    match value {
        Value::Number(n) => Ok(Numeric::Number(n)),
        Value::Unit => Ok(Numeric::Unit),
        other => Err(RuntimeError::invalid_argument(
            name,
            format!("expected a number, got {}", other.kind()),
        )),
    }
}

fn map_number(
    name: &str,
    args: &[Value],
    op: impl Fn(&Rational) -> Rational,
) -> Result<Value, RuntimeError> {
    match numeric_arg(name, &args[0])? {
        Numeric::Number(n) => Ok(Value::Number(op(n))),
        Numeric::Unit => Ok(Value::Unit),
    }
}

/// Evaluate through `f64`; non-finite inputs pass straight to `f`
fn approximate(name: &str, args: &[Value], f: fn(f64) -> f64) -> Result<Value, RuntimeError> {
    map_number(name, args, |n| Rational::from_f64(f(n.to_f64())))
}

fn builtin_abs(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("abs", args, Rational::abs)
}

fn builtin_sign(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("sign", args, Rational::signum)
}

fn builtin_floor(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("floor", args, Rational::floor)
}

fn builtin_ceil(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("ceil", args, Rational::ceil)
}

fn builtin_round(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("round", args, Rational::round)
}

fn builtin_numerator(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("numerator", args, |n| Rational::from_integer(n.numer().clone()))
}

fn builtin_denominator(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("denominator", args, |n| Rational::from_integer(n.denom().clone()))
}

fn builtin_sqrt(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    map_number("sqrt", args, |n| n.pow(&Rational::from_ratio(1, 2)))
}

fn builtin_root(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    let degree = match numeric_arg("root", &args[1])? {
        Numeric::Unit => return Ok(Value::Unit),
        Numeric::Number(n) => n,
    };
    let degree = if degree.is_integer() && !degree.is_negative() {
        degree.numer().to_u32()
    } else {
        None
    };
    match degree {
        Some(degree) if degree > 0 => map_number("root", args, |n| n.nth_root(degree)),
        _ => Err(RuntimeError::invalid_argument(
            "root",
            "degree must be a positive integer",
        )),
    }
}

/// Shared body of `min` and `max`; `Undefined` anywhere makes the result
/// `Undefined`
fn extremum(name: &str, args: &[Value], keep: Ordering) -> Result<Value, RuntimeError> {
    let mut best: Option<Rational> = None;
    for arg in args {
        let n = match numeric_arg(name, arg)? {
            Numeric::Unit => return Ok(Value::Unit),
            Numeric::Number(n) => n,
        };
        best = match best {
            None => Some(n.clone()),
            Some(current) => match n.compare(&current) {
                None => return Ok(Value::Number(Rational::undefined())),
                Some(ordering) if ordering == keep => Some(n.clone()),
                Some(_) => Some(current),
            },
        };
    }
    Ok(best.map(Value::Number).unwrap_or(Value::Unit))
}

fn builtin_min(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    extremum("min", args, Ordering::Less)
}

fn builtin_max(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    extremum("max", args, Ordering::Greater)
}

fn builtin_sin(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("sin", args, f64::sin)
}

fn builtin_cos(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("cos", args, f64::cos)
}

fn builtin_tan(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("tan", args, f64::tan)
}

fn builtin_asin(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("asin", args, f64::asin)
}

fn builtin_acos(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("acos", args, f64::acos)
}

fn builtin_atan(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("atan", args, f64::atan)
}

fn builtin_exp(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("exp", args, f64::exp)
}

fn builtin_ln(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("ln", args, f64::ln)
}

fn builtin_log(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    approximate("log", args, f64::log10)
}

fn limit_at(
    name: &str,
    interp: &mut Interpreter,
    args: &[Value],
    approach: Approach,
) -> Result<Value, RuntimeError> {
    match numeric_arg(name, &args[1])? {
        Numeric::Unit => Ok(Value::Unit),
        Numeric::Number(at) => limit::limit(interp, &args[0], at, approach),
    }
}

fn builtin_limit(interp: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    limit_at("limit", interp, args, Approach::Both)
}

fn builtin_limit_left(interp: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    limit_at("limit_left", interp, args, Approach::Left)
}

fn builtin_limit_right(interp: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    limit_at("limit_right", interp, args, Approach::Right)
}

fn builtin_compose(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::compose(&args[0], &args[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::config::EvalConfig;

    fn call(name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let mut interp = Interpreter::new(EvalConfig::default());
        let callee = BuiltinTable::standard()
            .get(name)
            .expect("builtin should exist");
        interp.call_value(&callee, args)
    }

    fn ratio(n: i64, d: i64) -> Value {
        Value::Number(Rational::from_ratio(n, d))
    }

    #[test]
    fn test_exact_builtins() {
        assert_eq!(call("abs", vec![ratio(-3, 4)]).unwrap(), ratio(3, 4));
        assert_eq!(call("floor", vec![ratio(-7, 2)]).unwrap(), Value::number(-4));
        assert_eq!(call("round", vec![ratio(5, 2)]).unwrap(), Value::number(3));
        assert_eq!(call("denominator", vec![ratio(6, 8)]).unwrap(), Value::number(4));
        assert_eq!(call("sqrt", vec![ratio(9, 4)]).unwrap(), ratio(3, 2));
        assert_eq!(call("root", vec![Value::number(27), Value::number(3)]).unwrap(), Value::number(3));
    }

    #[test]
    fn test_min_max_variadic() {
        let args = vec![Value::number(4), ratio(1, 2), Value::number(-2)];
        assert_eq!(call("min", args.clone()).unwrap(), Value::number(-2));
        assert_eq!(call("max", args).unwrap(), Value::number(4));
        let with_undefined = vec![Value::number(1), Value::Number(Rational::undefined())];
        assert_eq!(
            call("max", with_undefined).unwrap(),
            Value::Number(Rational::undefined())
        );
    }

    #[test]
    fn test_arity_is_checked() {
        let err = call("abs", vec![]).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::ArgumentCountMismatch { expected: 1, got: 0, .. }
        ));
        assert!(call("min", vec![]).is_err());
    }

    #[test]
    fn test_non_numeric_argument_is_rejected() {
        let abs = BuiltinTable::standard().get("abs").expect("abs should exist");
        let err = call("floor", vec![abs]).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidArgument { .. }));
        assert_eq!(call("floor", vec![Value::Unit]).unwrap(), Value::Unit);
    }

    #[test]
    fn test_approximate_builtins_stay_close() {
        let value = call("sin", vec![Value::number(0)]).unwrap();
        assert_eq!(value, Value::number(0));
        let value = call("exp", vec![Value::number(1)]).unwrap();
        let e = value.as_number().expect("exp returns a number").to_f64();
        assert!((e - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_root_rejects_bad_degree() {
        let err = call("root", vec![Value::number(8), ratio(1, 2)]).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidArgument { .. }));
    }

    #[test]
    fn test_constants() {
        let table = BuiltinTable::standard();
        let pi = table.get("pi").expect("pi should exist");
        let pi = pi.as_number().expect("pi is a number").to_f64();
        assert!((pi - std::f64::consts::PI).abs() < 1e-15);
        assert_eq!(table.get("unit"), Some(Value::Unit));
        assert_eq!(table.get("Infinity"), Some(Value::Number(Rational::infinity())));
    }
}
