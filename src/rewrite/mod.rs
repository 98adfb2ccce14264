//! Term-rewriting pipeline
//!
//! Expressions are normalized before evaluation by a fixed sequence of
//! passes, each a pure function from tree to tree:
//!
//! ```text
//! transform_negatives → level_operators → simplify_rationals
//!     → to_canonical_order → unfold_constant
//! ```
//!
//! - [`negatives`]: `-x`, `+x`, `x%` and `a - b` become sums and products
//! - [`level`]: nested `+`/`*` chains become one n-ary commutative node
//! - [`rationals`]: divisions are pulled above multiplications
//! - [`canonical`]: commutative operand lists are sorted
//! - [`fold`]: identities and literal arithmetic are folded away
//!
//! The pipeline never fails. [`Rewriter::normalize`] repeats the whole
//! sequence until a round leaves the tree unchanged, so its output is a
//! fixpoint of [`Rewriter::rewrite`].

pub mod canonical;
pub mod fold;
pub mod level;
pub mod negatives;
pub mod rationals;

pub use canonical::to_canonical_order;
pub use fold::unfold_constant;
pub use level::level_operators;
pub use negatives::transform_negatives;
pub use rationals::simplify_rationals;

use crate::syntax::{Case, Expr, Predicate};
use log::{debug, trace, warn};

/// Rounds of the pipeline before [`Rewriter::normalize`] gives up
pub const DEFAULT_MAX_ROUNDS: usize = 16;

/// A single rewrite pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewritePass {
    /// Turn negation, percent and subtraction into `+` and `*`
    TransformNegatives,
    /// Flatten same-operator `+`/`*` chains
    LevelOperators,
    /// Move divisions out from under multiplications
    SimplifyRationals,
    /// Sort commutative operands
    CanonicalOrder,
    /// Fold identities and literal arithmetic
    UnfoldConstant,
}

impl RewritePass {
    pub fn name(self) -> &'static str {
        match self {
            RewritePass::TransformNegatives => "transform_negatives",
            RewritePass::LevelOperators => "level_operators",
            RewritePass::SimplifyRationals => "simplify_rationals",
            RewritePass::CanonicalOrder => "to_canonical_order",
            RewritePass::UnfoldConstant => "unfold_constant",
        }
    }

    pub fn apply(self, expr: &Expr) -> Expr {
        match self {
            RewritePass::TransformNegatives => transform_negatives(expr),
            RewritePass::LevelOperators => level_operators(expr),
            RewritePass::SimplifyRationals => simplify_rationals(expr),
            RewritePass::CanonicalOrder => to_canonical_order(expr),
            RewritePass::UnfoldConstant => unfold_constant(expr),
        }
    }
}

/// Ordered sequence of passes
#[derive(Debug, Clone)]
pub struct Rewriter {
    passes: Vec<RewritePass>,
    max_rounds: usize,
}

impl Rewriter {
    /// Pipeline running exactly `passes`, in order
    pub fn with_passes(passes: Vec<RewritePass>) -> Self {
        Rewriter {
            passes,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn default_pipeline() -> Self {
        Self::with_passes(vec![
            RewritePass::TransformNegatives,
            RewritePass::LevelOperators,
            RewritePass::SimplifyRationals,
            RewritePass::CanonicalOrder,
            RewritePass::UnfoldConstant,
        ])
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn passes(&self) -> &[RewritePass] {
        &self.passes
    }

    /// Apply every pass once
    pub fn rewrite(&self, expr: &Expr) -> Expr {
        let mut current = expr.clone();
        for pass in &self.passes {
            let next = pass.apply(&current);
            trace!(
                "{}: {}",
                pass.name(),
                if next == current { "unchanged" } else { "changed" }
            );
            current = next;
        }
        current
    }

    /// Rewrite until a round changes nothing
    pub fn normalize(&self, expr: &Expr) -> Expr {
        let mut current = expr.clone();
        for round in 1..=self.max_rounds {
            let next = self.rewrite(&current);
            if next == current {
                debug!("rewrite reached a fixpoint after {} round(s)", round);
                return next;
            }
            debug!("rewrite round {}: {}", round, next);
            current = next;
        }
        warn!(
            "rewrite stopped after {} rounds without reaching a fixpoint",
            self.max_rounds
        );
        current
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

/// Rebuild `expr` with `f` applied to each direct child
pub(crate) fn map_children(expr: &Expr, f: &mut impl FnMut(&Expr) -> Expr) -> Expr {
    match expr {
        Expr::Number(_) | Expr::Variable(_) | Expr::Unit | Expr::Foreign(_) => expr.clone(),

        Expr::Assign {
            name,
            value,
            is_new_binding,
        } => Expr::Assign {
            name: name.clone(),
            value: Box::new(f(value)),
            is_new_binding: *is_new_binding,
        },

        Expr::Function { params, body } => Expr::Function {
            params: params.clone(),
            body: Box::new(f(body)),
        },

        Expr::Piecewise(cases) => Expr::Piecewise(
            cases
                .iter()
                .map(|case| Case {
                    predicate: match &case.predicate {
                        Predicate::When(predicate) => Predicate::When(f(predicate)),
                        Predicate::Otherwise => Predicate::Otherwise,
                    },
                    action: f(&case.action),
                })
                .collect(),
        ),

        Expr::Apply { callee, args } => Expr::Apply {
            callee: Box::new(f(callee)),
            args: args.iter().map(&mut *f).collect(),
        },

        Expr::PartialApply { bound, callee } => Expr::PartialApply {
            bound: bound.iter().map(&mut *f).collect(),
            callee: Box::new(f(callee)),
        },

        Expr::Unary {
            operand,
            op,
            prefix,
        } => Expr::Unary {
            operand: Box::new(f(operand)),
            op: *op,
            prefix: *prefix,
        },

        Expr::Binary { lhs, rhs, op } => Expr::Binary {
            lhs: Box::new(f(lhs)),
            rhs: Box::new(f(rhs)),
            op: *op,
        },

        Expr::Commutative { operands, op } => Expr::Commutative {
            operands: operands.iter().map(&mut *f).collect(),
            op: *op,
        },

        Expr::Block(exprs) => Expr::Block(exprs.iter().map(&mut *f).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::AcOp;

    #[test]
    fn test_default_pipeline_order() {
        assert_eq!(
            Rewriter::default_pipeline().passes(),
            &[
                RewritePass::TransformNegatives,
                RewritePass::LevelOperators,
                RewritePass::SimplifyRationals,
                RewritePass::CanonicalOrder,
                RewritePass::UnfoldConstant,
            ]
        );
    }

    #[test]
    fn test_subtracting_a_term_from_itself_is_zero() {
        let expr = Expr::sub(Expr::var("a"), Expr::var("a"));
        assert_eq!(Rewriter::default_pipeline().normalize(&expr), Expr::int(0));
    }

    #[test]
    fn test_constant_expression_folds_to_one_literal() {
        let expr = Expr::add(Expr::int(2), Expr::mul(Expr::int(3), Expr::int(4)));
        assert_eq!(Rewriter::default_pipeline().normalize(&expr), Expr::int(14));
    }

    #[test]
    fn test_normalize_is_a_fixpoint() {
        let expr = Expr::div(
            Expr::mul(Expr::var("x"), Expr::div(Expr::var("y"), Expr::int(3))),
            Expr::sub(Expr::var("z"), Expr::int(0)),
        );
        let rewriter = Rewriter::default_pipeline();
        let once = rewriter.normalize(&expr);
        assert_eq!(rewriter.rewrite(&once), once);
        assert_eq!(rewriter.normalize(&once), once);
    }

    #[test]
    fn test_custom_pipeline_runs_only_its_passes() {
        let expr = Expr::add(Expr::var("b"), Expr::add(Expr::var("a"), Expr::int(0)));
        let leveled = Rewriter::with_passes(vec![RewritePass::LevelOperators]).rewrite(&expr);
        assert_eq!(
            leveled,
            Expr::commutative(AcOp::Add, vec![Expr::var("b"), Expr::var("a"), Expr::int(0)])
        );
    }

    #[test]
    fn test_rewrite_reaches_function_bodies() {
        let expr = Expr::lambda(&["x"], Expr::mul(Expr::var("x"), Expr::int(1)));
        assert_eq!(
            Rewriter::default_pipeline().normalize(&expr),
            Expr::lambda(&["x"], Expr::var("x"))
        );
    }
}
