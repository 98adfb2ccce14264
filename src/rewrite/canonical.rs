//! Canonical operand order
//!
//! Sorts the operands of every commutative node, innermost nodes first, with
//! [`crate::syntax::canonical_cmp`]. Literals end up at the front, which is
//! where the folding pass looks for them.

use super::map_children;
use crate::syntax::{sort_canonical, Expr};

pub fn to_canonical_order(expr: &Expr) -> Expr {
    match map_children(expr, &mut to_canonical_order) {
        Expr::Commutative { mut operands, op } => {
            sort_canonical(&mut operands);
            Expr::Commutative { operands, op }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::AcOp;

    #[test]
    fn test_literals_then_variables_then_the_rest() {
        let call = Expr::apply(Expr::var("f"), vec![Expr::var("x")]);
        let expr = Expr::commutative(
            AcOp::Add,
            vec![call.clone(), Expr::var("y"), Expr::int(3), Expr::var("a"), Expr::num("0.5")],
        );
        assert_eq!(
            to_canonical_order(&expr),
            Expr::commutative(
                AcOp::Add,
                vec![Expr::num("0.5"), Expr::int(3), Expr::var("a"), Expr::var("y"), call]
            )
        );
    }

    #[test]
    fn test_children_are_sorted_too() {
        let inner = Expr::commutative(AcOp::Mul, vec![Expr::var("b"), Expr::var("a")]);
        let expr = Expr::apply(Expr::var("g"), vec![inner]);
        let sorted = Expr::apply(
            Expr::var("g"),
            vec![Expr::commutative(AcOp::Mul, vec![Expr::var("a"), Expr::var("b")])],
        );
        assert_eq!(to_canonical_order(&expr), sorted);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let expr = Expr::commutative(
            AcOp::Add,
            vec![
                Expr::var("z"),
                Expr::commutative(AcOp::Mul, vec![Expr::var("q"), Expr::int(2)]),
                Expr::int(-1),
                Expr::var("b"),
            ],
        );
        let once = to_canonical_order(&expr);
        assert_eq!(to_canonical_order(&once), once);
    }
}
