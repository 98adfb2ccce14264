//! Divisions above multiplications
//!
//! ```text
//! a * (b / c)   →  (a * b) / c
//! (a / b) / c   →  a / (b * c)
//! a / (b / c)   →  (a * c) / b
//! ```
//!
//! A leveled product loses every division among its operands at once:
//! `*[a, b/c, d/e]` becomes `*[a, b, d] / *[c, e]`. The result never has a
//! division directly under a multiplication.

use super::map_children;
use crate::syntax::{AcOp, BinOp, Expr};

pub fn simplify_rationals(expr: &Expr) -> Expr {
    let expr = map_children(expr, &mut simplify_rationals);
    simplify_node(expr)
}

fn simplify_node(expr: Expr) -> Expr {
    match expr {
        Expr::Binary {
            lhs,
            rhs,
            op: BinOp::Mul,
        } => match (*lhs, *rhs) {
            (a, Expr::Binary {
                lhs: b,
                rhs: c,
                op: BinOp::Div,
            }) => simplify_node(Expr::div(simplify_node(Expr::mul(a, *b)), *c)),
            (Expr::Binary {
                lhs: a,
                rhs: b,
                op: BinOp::Div,
            }, c) => simplify_node(Expr::div(simplify_node(Expr::mul(*a, c)), *b)),
            (a, b) => Expr::mul(a, b),
        },

        Expr::Binary {
            lhs,
            rhs,
            op: BinOp::Div,
        } => match (*lhs, *rhs) {
            (Expr::Binary {
                lhs: a,
                rhs: b,
                op: BinOp::Div,
            }, c) => simplify_node(Expr::div(*a, simplify_node(Expr::mul(*b, c)))),
            (a, Expr::Binary {
                lhs: b,
                rhs: c,
                op: BinOp::Div,
            }) => simplify_node(Expr::div(simplify_node(Expr::mul(a, *c)), *b)),
            (a, b) => Expr::div(a, b),
        },

        Expr::Commutative {
            operands,
            op: AcOp::Mul,
        } if operands.iter().any(is_division) => {
            let mut numerators = Vec::with_capacity(operands.len());
            let mut denominators = Vec::new();
            for operand in operands {
                match operand {
                    Expr::Binary {
                        lhs,
                        rhs,
                        op: BinOp::Div,
                    } => {
                        numerators.push(*lhs);
                        denominators.push(*rhs);
                    }
                    other => numerators.push(other),
                }
            }
            let numerator = simplify_node(Expr::commutative(AcOp::Mul, numerators));
            let denominator = simplify_node(product(denominators));
            simplify_node(Expr::div(numerator, denominator))
        }

        other => other,
    }
}

fn is_division(expr: &Expr) -> bool {
    matches!(expr, Expr::Binary { op: BinOp::Div, .. })
}

fn product(mut factors: Vec<Expr>) -> Expr {
    if factors.len() == 1 {
        factors.remove(0)
    } else {
        Expr::commutative(AcOp::Mul, factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn test_product_with_quotient() {
        let expr = Expr::mul(v("a"), Expr::div(v("b"), v("c")));
        assert_eq!(
            simplify_rationals(&expr),
            Expr::div(Expr::mul(v("a"), v("b")), v("c"))
        );
    }

    #[test]
    fn test_quotient_of_quotient() {
        let expr = Expr::div(Expr::div(v("a"), v("b")), v("c"));
        assert_eq!(
            simplify_rationals(&expr),
            Expr::div(v("a"), Expr::mul(v("b"), v("c")))
        );
    }

    #[test]
    fn test_dividing_by_a_quotient() {
        let expr = Expr::div(v("a"), Expr::div(v("b"), v("c")));
        assert_eq!(
            simplify_rationals(&expr),
            Expr::div(Expr::mul(v("a"), v("c")), v("b"))
        );
    }

    #[test]
    fn test_leveled_product_pulls_out_every_division() {
        let expr = Expr::commutative(
            AcOp::Mul,
            vec![v("a"), Expr::div(v("b"), v("c")), Expr::div(v("d"), v("e"))],
        );
        assert_eq!(
            simplify_rationals(&expr),
            Expr::div(
                Expr::commutative(AcOp::Mul, vec![v("a"), v("b"), v("d")]),
                Expr::commutative(AcOp::Mul, vec![v("c"), v("e")])
            )
        );
    }

    #[test]
    fn test_sums_keep_their_divisions() {
        let expr = Expr::add(Expr::div(v("a"), v("b")), v("c"));
        assert_eq!(simplify_rationals(&expr), expr);
    }
}
