//! Leveling of `+` and `*` chains
//!
//! `(a + b) + (c + d)` becomes the single node `+[a, b, c, d]`. Only children
//! with the same operator are merged; `a * (b + c)` keeps its sum as one
//! operand of the product.

use super::map_children;
use crate::syntax::{AcOp, Expr};

pub fn level_operators(expr: &Expr) -> Expr {
    let expr = map_children(expr, &mut level_operators);
    match expr {
        Expr::Binary { lhs, rhs, op } => match AcOp::from_binary(op) {
            Some(ac) => {
                let mut operands = Vec::new();
                splice(ac, *lhs, &mut operands);
                splice(ac, *rhs, &mut operands);
                Expr::commutative(ac, operands)
            }
            None => Expr::Binary { lhs, rhs, op },
        },

        Expr::Commutative { operands, op } => {
            let mut leveled = Vec::with_capacity(operands.len());
            for operand in operands {
                splice(op, operand, &mut leveled);
            }
            Expr::commutative(op, leveled)
        }

        other => other,
    }
}

/// Push `expr` onto `out`, inlining its operands when it is the same operator
pub(crate) fn splice(op: AcOp, expr: Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Commutative {
            operands,
            op: inner,
        } if inner == op => out.extend(operands),
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(names: &[&str]) -> Vec<Expr> {
        names.iter().map(|name| Expr::var(*name)).collect()
    }

    #[test]
    fn test_nested_sums_flatten() {
        let expr = Expr::add(
            Expr::add(Expr::var("a"), Expr::var("b")),
            Expr::add(Expr::var("c"), Expr::var("d")),
        );
        assert_eq!(
            level_operators(&expr),
            Expr::commutative(AcOp::Add, vars(&["a", "b", "c", "d"]))
        );
    }

    #[test]
    fn test_different_operators_stay_separate() {
        let expr = Expr::mul(Expr::var("a"), Expr::add(Expr::var("b"), Expr::var("c")));
        assert_eq!(
            level_operators(&expr),
            Expr::commutative(
                AcOp::Mul,
                vec![Expr::var("a"), Expr::commutative(AcOp::Add, vars(&["b", "c"]))]
            )
        );
    }

    #[test]
    fn test_existing_commutative_nodes_absorb_children() {
        let expr = Expr::commutative(
            AcOp::Mul,
            vec![
                Expr::var("a"),
                Expr::mul(Expr::var("b"), Expr::var("c")),
                Expr::commutative(AcOp::Mul, vars(&["d"])),
            ],
        );
        assert_eq!(
            level_operators(&expr),
            Expr::commutative(AcOp::Mul, vars(&["a", "b", "c", "d"]))
        );
    }

    #[test]
    fn test_leveling_inside_other_nodes() {
        let expr = Expr::div(
            Expr::add(Expr::var("a"), Expr::add(Expr::var("b"), Expr::var("c"))),
            Expr::var("d"),
        );
        assert_eq!(
            level_operators(&expr),
            Expr::div(Expr::commutative(AcOp::Add, vars(&["a", "b", "c"])), Expr::var("d"))
        );
    }
}
