//! Negation, percent and subtraction as sums and products
//!
//! | input    | output           |
//! |----------|------------------|
//! | `+x`     | `x`              |
//! | `-x`     | `(-1) * x`       |
//! | `x%`     | `x * 0.01`       |
//! | `a - b`  | `a + ((-1) * b)` |
//!
//! Afterwards the only arithmetic left is `+ * / mod ^`, which is what lets
//! the later passes treat sums and products as commutative.

use super::map_children;
use crate::syntax::{BinOp, Expr, UnOp};

pub fn transform_negatives(expr: &Expr) -> Expr {
    let expr = map_children(expr, &mut transform_negatives);
    match expr {
        Expr::Unary {
            operand,
            op: UnOp::Positive,
            prefix: true,
        } => *operand,

        Expr::Unary {
            operand,
            op: UnOp::Negate,
            prefix: true,
        } => negated(*operand),

        Expr::Unary {
            operand,
            op: UnOp::Percent,
            prefix: false,
        } => Expr::mul(*operand, Expr::num("0.01")),

        Expr::Binary {
            lhs,
            rhs,
            op: BinOp::Sub,
        } => Expr::add(*lhs, negated(*rhs)),

        other => other,
    }
}

fn negated(expr: Expr) -> Expr {
    Expr::mul(Expr::int(-1), expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_operators() {
        let expr = Expr::prefix(UnOp::Positive, Expr::var("x"));
        assert_eq!(transform_negatives(&expr), Expr::var("x"));

        let expr = Expr::prefix(UnOp::Negate, Expr::var("x"));
        assert_eq!(transform_negatives(&expr), Expr::mul(Expr::int(-1), Expr::var("x")));
    }

    #[test]
    fn test_percent_scales_by_one_hundredth() {
        let expr = Expr::postfix(Expr::int(50), UnOp::Percent);
        assert_eq!(transform_negatives(&expr), Expr::mul(Expr::int(50), Expr::num("0.01")));
    }

    #[test]
    fn test_subtraction_adds_the_negation() {
        let expr = Expr::sub(Expr::var("a"), Expr::var("b"));
        assert_eq!(
            transform_negatives(&expr),
            Expr::add(Expr::var("a"), Expr::mul(Expr::int(-1), Expr::var("b")))
        );
    }

    #[test]
    fn test_nested_operands_are_rewritten_first() {
        // -(a - b)
        let expr = Expr::prefix(UnOp::Negate, Expr::sub(Expr::var("a"), Expr::var("b")));
        let expected = Expr::mul(
            Expr::int(-1),
            Expr::add(Expr::var("a"), Expr::mul(Expr::int(-1), Expr::var("b"))),
        );
        assert_eq!(transform_negatives(&expr), expected);
    }

    #[test]
    fn test_other_operators_are_untouched() {
        let expr = Expr::div(Expr::var("a"), Expr::pow(Expr::var("b"), Expr::int(2)));
        assert_eq!(transform_negatives(&expr), expr);
    }
}
