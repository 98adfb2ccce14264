use exacta::{BinOp, Expr, RewritePass, Rewriter, UnOp};

fn v(name: &str) -> Expr {
    Expr::var(name)
}

fn normalize(expr: &Expr) -> String {
    Rewriter::default().normalize(expr).to_string()
}

#[test]
fn test_default_pipeline_order() {
    let rewriter = Rewriter::default();
    assert_eq!(
        rewriter.passes(),
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
fn test_self_cancellation() {
    assert_eq!(normalize(&Expr::sub(v("a"), v("a"))), "0");
    assert_eq!(normalize(&Expr::div(v("a"), v("a"))), "1");

    // a + b - a
    let expr = Expr::sub(Expr::add(v("a"), v("b")), v("a"));
    assert_eq!(normalize(&expr), "b");
}

#[test]
fn test_identity_laws() {
    // (2 * x + 0) * 1
    let expr = Expr::mul(
        Expr::add(Expr::mul(Expr::int(2), v("x")), Expr::int(0)),
        Expr::int(1),
    );
    assert_eq!(normalize(&expr), "2 * x");

    assert_eq!(normalize(&Expr::div(v("x"), Expr::int(1))), "x");
    assert_eq!(normalize(&Expr::pow(v("x"), Expr::int(1))), "x");
    assert_eq!(normalize(&Expr::pow(v("x"), Expr::int(0))), "1");
    assert_eq!(normalize(&Expr::mul(v("x"), Expr::int(0))), "0");
}

#[test]
fn test_literals_are_gathered_and_folded() {
    // 3 + x + 4
    let expr = Expr::add(Expr::add(Expr::int(3), v("x")), Expr::int(4));
    assert_eq!(normalize(&expr), "7 + x");

    // operand order does not matter
    let expr = Expr::add(Expr::int(4), Expr::add(v("x"), Expr::int(3)));
    assert_eq!(normalize(&expr), "7 + x");
}

#[test]
fn test_divisions_are_lifted_over_products() {
    let expr = Expr::mul(v("a"), Expr::div(v("b"), v("c")));
    assert_eq!(normalize(&expr), "(a * b) / c");
}

#[test]
fn test_percent_becomes_a_product() {
    let expr = Expr::postfix(v("x"), UnOp::Percent);
    assert_eq!(normalize(&expr), "0.01 * x");
}

#[test]
fn test_normalized_trees_are_fixpoints() {
    let rewriter = Rewriter::default();
    let samples = vec![
        Expr::sub(Expr::mul(Expr::int(3), v("x")), Expr::prefix(UnOp::Negate, v("y"))),
        Expr::div(Expr::div(v("a"), v("b")), Expr::div(v("c"), v("d"))),
        Expr::add(
            Expr::mul(Expr::num("0.5"), Expr::add(v("z"), Expr::int(2))),
            Expr::binary(v("x"), BinOp::Mod, Expr::int(1)),
        ),
        Expr::apply(v("f"), vec![Expr::sub(v("x"), Expr::int(0))]),
        Expr::lambda(&["x"], Expr::add(Expr::int(1), Expr::add(v("x"), Expr::int(1)))),
    ];

    for sample in samples {
        let normal = rewriter.normalize(&sample);
        assert_eq!(rewriter.rewrite(&normal), normal, "not a fixpoint: {}", normal);
    }
}

#[test]
fn test_rewriting_reaches_inside_functions_and_calls() {
    let expr = Expr::lambda(&["x"], Expr::sub(v("x"), v("x")));
    assert_eq!(normalize(&expr), "(x) -> 0");

    let expr = Expr::apply(v("f"), vec![Expr::mul(Expr::int(1), v("y"))]);
    assert_eq!(normalize(&expr), "f(y)");
}

#[test]
fn test_custom_pipeline_runs_only_its_passes() {
    let rewriter = Rewriter::with_passes(vec![RewritePass::TransformNegatives]);
    let expr = Expr::sub(v("a"), v("b"));
    assert_eq!(rewriter.rewrite(&expr).to_string(), "a + (-1 * b)");
}
