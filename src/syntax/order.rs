//! Canonical order over expression nodes
//!
//! Sorting commutative operand lists by this order makes constant folding
//! independent of input order and lets two algebraically identical trees
//! compare structurally equal.
//!
//! Rank: numeric literals, then variable references, then everything else.
//! Literals compare by value (malformed text falls back to comparing the text
//! and sorts after every well-formed literal), variables by name. All other
//! nodes share one rank and compare `Equal`; a stable sort keeps them in their
//! original relative order, which is what makes re-sorting idempotent.

use super::ast::Expr;
use std::cmp::Ordering;

fn rank(expr: &Expr) -> u8 {
    match expr {
        Expr::Number(_) => 0,
        Expr::Variable(_) => 1,
        _ => 2,
    }
}

/// Compare two nodes under the canonical order
pub fn canonical_cmp(a: &Expr, b: &Expr) -> Ordering {
    let by_rank = rank(a).cmp(&rank(b));
    if by_rank != Ordering::Equal {
        return by_rank;
    }

    match (a, b) {
        (Expr::Number(text_a), Expr::Number(text_b)) => {
            match (a.literal_value(), b.literal_value()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => text_a.cmp(text_b),
            }
        }
        (Expr::Variable(name_a), Expr::Variable(name_b)) => name_a.cmp(name_b),
        _ => Ordering::Equal,
    }
}

/// Stable sort of an operand list under [`canonical_cmp`]
pub fn sort_canonical(operands: &mut [Expr]) {
    operands.sort_by(canonical_cmp);
}
