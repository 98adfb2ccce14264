use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::numeric::Rational;
use crate::syntax::{AcOp, BinOp, Expr};
use crate::value::Value;

impl Interpreter {
    /// Evaluate `lhs op rhs`; `and` / `or` skip the right operand when the
    /// left one decides the result
    pub(crate) fn evaluate_binary_op(
        &mut self,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<Value, RuntimeError> {
        let left = self.eval_expr(lhs)?;
        match op {
            BinOp::And if !left.is_truthy() => return Ok(left),
            BinOp::Or if left.is_truthy() => return Ok(left),
            _ => {}
        }
        let right = self.eval_expr(rhs)?;
        Value::binary_op(op, &left, &right)
    }

    /// Fold a leveled operand list left to right
    pub(crate) fn evaluate_commutative(
        &mut self,
        op: AcOp,
        operands: &[Expr],
    ) -> Result<Value, RuntimeError> {
        let Some((first, rest)) = operands.split_first() else {
            return Ok(Value::Number(op.identity().parse::<Rational>()?));
        };

        let mut acc = self.eval_expr(first)?;
        for operand in rest {
            let value = self.eval_expr(operand)?;
            acc = Value::binary_op(op.as_binary(), &acc, &value)?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::config::EvalConfig;

    fn eval(expr: &Expr) -> Result<Value, RuntimeError> {
        Interpreter::new(EvalConfig::default().with_rewrite(false)).evaluate(expr)
    }

    #[test]
    fn test_and_short_circuits() {
        // the right operand would fail to resolve
        let expr = Expr::binary(Expr::int(0), BinOp::And, Expr::var("missing"));
        assert_eq!(eval(&expr).unwrap(), Value::number(0));

        let expr = Expr::binary(Expr::int(2), BinOp::Or, Expr::var("missing"));
        assert_eq!(eval(&expr).unwrap(), Value::number(2));

        let expr = Expr::binary(Expr::int(2), BinOp::And, Expr::var("missing"));
        assert!(eval(&expr).is_err());
    }

    #[test]
    fn test_commutative_folds_left_to_right() {
        let expr = Expr::commutative(AcOp::Mul, vec![Expr::int(2), Expr::int(3), Expr::int(7)]);
        assert_eq!(eval(&expr).unwrap(), Value::number(42));
        assert_eq!(eval(&Expr::commutative(AcOp::Add, vec![])).unwrap(), Value::number(0));
    }

    #[test]
    fn test_comparing_functions_is_a_dispatch_error() {
        let expr = Expr::binary(Expr::var("abs"), BinOp::Lt, Expr::int(1));
        let err = eval(&expr).unwrap_err();
        assert!(matches!(err, RuntimeError::NotOrdered { .. }));
    }
}
