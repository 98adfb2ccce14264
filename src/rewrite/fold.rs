//! Constant folding
//!
//! Runs bottom-up after canonical ordering, so literals sit at the front of
//! every commutative node.
//!
//! # Commutative Nodes
//!
//! - operands with the same operator are spliced in
//! - two or more literals fold into one when the exact result is finite and
//!   has a terminating decimal expansion
//! - `*`: a literal `0` makes the node `0`; literal `1`s are dropped
//! - `+`: literal `0`s are dropped; `x` and `(-1) * x` cancel
//! - an empty node becomes the operator's identity, a singleton its operand
//!
//! # Binary Nodes
//!
//! | operator | rules, in priority order                               |
//! |----------|--------------------------------------------------------|
//! | `mod`    | `a mod 1 → 0`                                          |
//! | `^`      | `a^0 → 1`, `1^a → 1`, `0^a → 0`, `a^1 → a`             |
//! | `-`      | `a - a → 0`, `a - 0 → a`, `0 - a → (-1) * a`           |
//! | `/`      | literals fold, `a/a → 1`, `a/1 → a`, `a/0 → Infinity`  |
//!
//! A division of two literals folds through the kernel, so `0/0` becomes
//! `Undefined` and `-3/0` becomes `-Infinity`.

use super::level::splice;
use super::map_children;
use crate::numeric::Rational;
use crate::syntax::{sort_canonical, AcOp, BinOp, Expr};
use crate::value::algebra::apply_arithmetic;

pub fn unfold_constant(expr: &Expr) -> Expr {
    match map_children(expr, &mut unfold_constant) {
        Expr::Commutative { operands, op } => fold_commutative(op, operands),
        Expr::Binary { lhs, rhs, op } => fold_binary(op, *lhs, *rhs),
        other => other,
    }
}

fn fold_commutative(op: AcOp, operands: Vec<Expr>) -> Expr {
    let mut spliced = Vec::with_capacity(operands.len());
    for operand in operands {
        splice(op, operand, &mut spliced);
    }

    let mut operands = fold_literals(op, spliced);
    match op {
        AcOp::Mul => {
            if operands.iter().any(|operand| operand.is_literal(0)) {
                return Expr::int(0);
            }
            operands.retain(|operand| !operand.is_literal(1));
        }
        AcOp::Add => {
            operands.retain(|operand| !operand.is_literal(0));
            cancel_negations(&mut operands);
        }
    }

    match operands.len() {
        0 => Expr::num(op.identity()),
        1 => operands.remove(0),
        _ => {
            sort_canonical(&mut operands);
            Expr::commutative(op, operands)
        }
    }
}

/// Replace all literal operands by their exact sum or product
fn fold_literals(op: AcOp, operands: Vec<Expr>) -> Vec<Expr> {
    let values: Vec<Rational> = operands.iter().filter_map(Expr::literal_value).collect();
    if values.len() < 2 {
        return operands;
    }

    let combined = values[1..]
        .iter()
        .fold(values[0].clone(), |acc, value| {
            apply_arithmetic(op.as_binary(), &acc, value)
        });
    let literal = match combined.is_finite().then(|| Expr::from_rational(&combined)) {
        Some(Some(literal)) => literal,
        _ => return operands,
    };

    let mut folded = Vec::with_capacity(operands.len() - values.len() + 1);
    folded.push(literal);
    folded.extend(
        operands
            .into_iter()
            .filter(|operand| operand.literal_value().is_none()),
    );
    folded
}

/// `x` if `expr` is the canonical negation `(-1) * x`
fn negation_target(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Commutative {
            operands,
            op: AcOp::Mul,
        } if operands.len() >= 2 && operands[0].is_literal(-1) => {
            let rest = &operands[1..];
            Some(match rest {
                [single] => single.clone(),
                _ => Expr::commutative(AcOp::Mul, rest.to_vec()),
            })
        }
        _ => None,
    }
}

fn cancel_negations(operands: &mut Vec<Expr>) {
    let mut i = 0;
    while i < operands.len() {
        let partner = negation_target(&operands[i]).and_then(|target| {
            operands
                .iter()
                .enumerate()
                .position(|(j, operand)| j != i && *operand == target)
        });
        match partner {
            Some(j) => {
                operands.remove(i.max(j));
                operands.remove(i.min(j));
                i = 0;
            }
            None => i += 1,
        }
    }
}

fn fold_binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    match op {
        BinOp::Mod if rhs.is_literal(1) => Expr::int(0),

        BinOp::Pow => {
            if rhs.is_literal(0) || lhs.is_literal(1) {
                Expr::int(1)
            } else if lhs.is_literal(0) {
                Expr::int(0)
            } else if rhs.is_literal(1) {
                lhs
            } else {
                Expr::pow(lhs, rhs)
            }
        }

        BinOp::Sub => {
            if lhs == rhs {
                Expr::int(0)
            } else if rhs.is_literal(0) {
                lhs
            } else if lhs.is_literal(0) {
                Expr::commutative(AcOp::Mul, vec![Expr::int(-1), rhs])
            } else {
                Expr::sub(lhs, rhs)
            }
        }

        BinOp::Div => fold_division(lhs, rhs),

        _ => Expr::binary(lhs, op, rhs),
    }
}

fn fold_division(lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(a), Some(b)) = (lhs.literal_value(), rhs.literal_value()) {
        let quotient = a.div(&b);
        if quotient.is_finite() || b.is_zero() {
            if let Some(literal) = Expr::from_rational(&quotient) {
                return literal;
            }
        }
        return Expr::div(lhs, rhs);
    }

    if lhs == rhs {
        Expr::int(1)
    } else if rhs.is_literal(1) {
        lhs
    } else if rhs.is_literal(0) {
        Expr::num("Infinity")
    } else {
        Expr::div(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(name: &str) -> Expr {
        Expr::var(name)
    }

    fn sum(operands: Vec<Expr>) -> Expr {
        Expr::commutative(AcOp::Add, operands)
    }

    fn product(operands: Vec<Expr>) -> Expr {
        Expr::commutative(AcOp::Mul, operands)
    }

    #[test]
    fn test_product_identities() {
        assert_eq!(unfold_constant(&product(vec![Expr::int(0), v("x")])), Expr::int(0));
        assert_eq!(unfold_constant(&product(vec![Expr::int(1), v("x")])), v("x"));
        assert_eq!(
            unfold_constant(&product(vec![Expr::int(1), v("x"), v("y")])),
            product(vec![v("x"), v("y")])
        );
    }

    #[test]
    fn test_sum_identities() {
        assert_eq!(unfold_constant(&sum(vec![Expr::int(0), v("x")])), v("x"));
        assert_eq!(unfold_constant(&sum(vec![Expr::int(0)])), Expr::int(0));
    }

    #[test]
    fn test_literals_fold_when_exact() {
        assert_eq!(
            unfold_constant(&sum(vec![Expr::num("0.5"), Expr::num("0.25"), v("x")])),
            sum(vec![Expr::num("0.75"), v("x")])
        );
        assert_eq!(
            unfold_constant(&product(vec![Expr::int(3), Expr::int(4)])),
            Expr::int(12)
        );
        assert_eq!(unfold_constant(&Expr::div(Expr::int(1), Expr::int(8))), Expr::num("0.125"));
        // 1/3 has no terminating expansion
        let third = Expr::div(Expr::int(1), Expr::int(3));
        assert_eq!(unfold_constant(&third), third);
    }

    #[test]
    fn test_term_cancels_its_negation() {
        let expr = sum(vec![v("a"), product(vec![Expr::int(-1), v("a")])]);
        assert_eq!(unfold_constant(&expr), Expr::int(0));

        let expr = sum(vec![
            v("b"),
            product(vec![Expr::int(-1), v("x"), v("y")]),
            product(vec![v("x"), v("y")]),
        ]);
        assert_eq!(unfold_constant(&expr), v("b"));
    }

    #[test]
    fn test_power_rules_in_priority_order() {
        assert_eq!(unfold_constant(&Expr::pow(Expr::int(0), Expr::int(0))), Expr::int(1));
        assert_eq!(unfold_constant(&Expr::pow(Expr::int(1), v("x"))), Expr::int(1));
        assert_eq!(unfold_constant(&Expr::pow(Expr::int(0), v("x"))), Expr::int(0));
        assert_eq!(unfold_constant(&Expr::pow(v("x"), Expr::int(1))), v("x"));
        let square = Expr::pow(v("x"), Expr::int(2));
        assert_eq!(unfold_constant(&square), square);
    }

    #[test]
    fn test_modulo_by_one() {
        let expr = Expr::binary(v("x"), BinOp::Mod, Expr::int(1));
        assert_eq!(unfold_constant(&expr), Expr::int(0));
    }

    #[test]
    fn test_subtraction_rules() {
        assert_eq!(unfold_constant(&Expr::sub(v("a"), v("a"))), Expr::int(0));
        assert_eq!(unfold_constant(&Expr::sub(v("a"), Expr::int(0))), v("a"));
        assert_eq!(
            unfold_constant(&Expr::sub(Expr::int(0), v("a"))),
            product(vec![Expr::int(-1), v("a")])
        );
    }

    #[test]
    fn test_division_rules() {
        assert_eq!(unfold_constant(&Expr::div(v("a"), v("a"))), Expr::int(1));
        assert_eq!(unfold_constant(&Expr::div(v("a"), Expr::int(1))), v("a"));
        assert_eq!(unfold_constant(&Expr::div(v("a"), Expr::int(0))), Expr::num("Infinity"));
        assert_eq!(
            unfold_constant(&Expr::div(Expr::int(0), Expr::int(0))),
            Expr::num("Undefined")
        );
        assert_eq!(
            unfold_constant(&Expr::div(Expr::int(-3), Expr::int(0))),
            Expr::num("-Infinity")
        );
    }

    #[test]
    fn test_nested_commutative_nodes_are_spliced() {
        // *[2, *[1, x]] collapses the inner product to x first
        let expr = product(vec![Expr::int(2), product(vec![v("y"), v("x"), Expr::int(1)])]);
        assert_eq!(
            unfold_constant(&expr),
            product(vec![Expr::int(2), v("x"), v("y")])
        );
    }
}
