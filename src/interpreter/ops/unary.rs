use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::syntax::{Expr, UnOp};
use crate::value::Value;

impl Interpreter {
    pub(crate) fn evaluate_unary_op(&mut self, op: UnOp, operand: &Expr) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(operand)?;
        Value::unary_op(op, &value)
    }
}
