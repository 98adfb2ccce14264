//! Randomized checks over generated arithmetic trees
//!
//! Trees are built together with their exact value, so the evaluator can be
//! checked against the kernel without a reference implementation. Divisors
//! that evaluate to zero are regenerated, which keeps the rewriter's
//! symbolic identities (`a/a → 1`, `a*0 → 0`) value-preserving.

use exacta::rewrite::to_canonical_order;
use exacta::{EvalConfig, Expr, Interpreter, Rational, Rewriter, Value};
use num_integer::Integer;
use num_traits::{One, Signed};

const SAMPLES: usize = 300;
const MAX_DEPTH: u32 = 4;

/// Linear congruential generator, deterministic across runs
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

const LITERALS: &[&str] = &["1", "2", "3", "7", "-4", "0.5", "1.25", "10"];
const VARIABLES: &[(&str, i64, i64)] = &[("x", 3, 1), ("y", -2, 1), ("z", 1, 2)];

fn leaf(rng: &mut Lcg) -> (Expr, Rational) {
    if rng.below(3) == 0 {
        let (name, numer, denom) = VARIABLES[rng.below(VARIABLES.len() as u64) as usize];
        (Expr::var(name), Rational::from_ratio(numer, denom))
    } else {
        let text = LITERALS[rng.below(LITERALS.len() as u64) as usize];
        let value = text.parse().expect("Literal table entry failed to parse");
        (Expr::num(text), value)
    }
}

fn tree(rng: &mut Lcg, depth: u32) -> (Expr, Rational) {
    if depth == 0 || rng.below(4) == 0 {
        return leaf(rng);
    }

    let (lhs, a) = tree(rng, depth - 1);
    match rng.below(4) {
        0 => {
            let (rhs, b) = tree(rng, depth - 1);
            (Expr::add(lhs, rhs), a.add(&b))
        }
        1 => {
            let (rhs, b) = tree(rng, depth - 1);
            (Expr::sub(lhs, rhs), a.sub(&b))
        }
        2 => {
            let (rhs, b) = tree(rng, depth - 1);
            (Expr::mul(lhs, rhs), a.mul(&b))
        }
        _ => loop {
            let (rhs, b) = tree(rng, depth - 1);
            if !b.is_zero() {
                break (Expr::div(lhs, rhs), a.div(&b));
            }
        },
    }
}

fn interpreter(rewrite: bool) -> Interpreter {
    let mut interp = Interpreter::new(EvalConfig::default().with_rewrite(rewrite));
    for &(name, numer, denom) in VARIABLES {
        interp.define(name, Value::Number(Rational::from_ratio(numer, denom)));
    }
    interp
}

fn samples() -> Vec<(Expr, Rational)> {
    let mut rng = Lcg(0x5eed);
    (0..SAMPLES).map(|_| tree(&mut rng, MAX_DEPTH)).collect()
}

#[test]
fn test_rewriting_preserves_values() {
    let mut plain = interpreter(false);
    let mut rewritten = interpreter(true);

    for (expr, expected) in samples() {
        let direct = plain.run(&expr).expect("Plain evaluation failed");
        let normalized = rewritten.run(&expr).expect("Rewritten evaluation failed");
        assert_eq!(direct, Value::Number(expected.clone()), "plain: {}", expr);
        assert_eq!(normalized, direct, "rewritten: {}", expr);
    }
}

#[test]
fn test_normal_forms_are_fixpoints() {
    let rewriter = Rewriter::default();
    for (expr, _) in samples() {
        let normal = rewriter.normalize(&expr);
        assert_eq!(rewriter.rewrite(&normal), normal, "input: {}", expr);
    }
}

#[test]
fn test_canonical_order_is_idempotent() {
    let rewriter = Rewriter::default();
    for (expr, _) in samples() {
        let leveled = rewriter.normalize(&expr);
        let once = to_canonical_order(&leveled);
        assert_eq!(to_canonical_order(&once), once, "input: {}", expr);
    }
}

#[test]
fn test_results_are_in_lowest_terms() {
    let mut interp = interpreter(true);
    for (expr, _) in samples() {
        let result = interp.run(&expr).expect("Evaluation failed");
        let n = result.as_number().expect("Expected a number");
        assert!(n.denom().is_positive(), "{} has a non-positive denominator", n);
        assert!(n.numer().gcd(n.denom()).is_one(), "{} is not reduced", n);
    }
}
