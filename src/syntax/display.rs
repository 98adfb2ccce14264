//! Infix rendering of expression trees
//!
//! Used for debugging output and log lines. Composite operands are always
//! parenthesized, so the text is unambiguous without precedence rules:
//! `(-1 * x) + 2`, `f(x, 3)`, `(x) -> (x ^ 2)`.

use super::ast::{Case, Expr, Predicate};
use std::fmt;

fn is_atomic(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Number(_) | Expr::Variable(_) | Expr::Apply { .. } | Expr::Unit | Expr::Foreign(_)
    )
}

struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_atomic(self.0) {
            write!(f, "{}", self.0)
        } else {
            write!(f, "({})", self.0)
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::When(predicate) => write!(f, "{} : {}", predicate, self.action),
            Predicate::Otherwise => write!(f, "else : {}", self.action),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(text) => f.write_str(text),
            Expr::Variable(name) => f.write_str(name),
            Expr::Assign {
                name,
                value,
                is_new_binding,
            } => {
                let arrow = if *is_new_binding { "=" } else { ":=" };
                write!(f, "{} {} {}", name, arrow, value)
            }
            Expr::Function { params, body } => {
                write!(f, "({}) -> {}", params.join(", "), Operand(body))
            }
            Expr::Piecewise(cases) => {
                f.write_str("{ ")?;
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", case)?;
                }
                f.write_str(" }")
            }
            Expr::Apply { callee, args } => {
                write!(f, "{}(", Operand(callee))?;
                write_list(f, args, ", ")?;
                f.write_str(")")
            }
            Expr::PartialApply { bound, callee } => {
                for arg in bound {
                    write!(f, "{}:", Operand(arg))?;
                }
                write!(f, "{}", Operand(callee))
            }
            Expr::Unary {
                operand,
                op,
                prefix: true,
            } => write!(f, "{}{}", op.symbol(), Operand(operand)),
            Expr::Unary {
                operand,
                op,
                prefix: false,
            } => write!(f, "{}{}", Operand(operand), op.symbol()),
            Expr::Binary { lhs, rhs, op } => {
                write!(f, "{} {} {}", Operand(lhs), op.symbol(), Operand(rhs))
            }
            Expr::Commutative { operands, op } => {
                let separator = format!(" {} ", op.as_binary().symbol());
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(&separator)?;
                    }
                    write!(f, "{}", Operand(operand))?;
                }
                Ok(())
            }
            Expr::Block(exprs) => {
                f.write_str("{ ")?;
                write_list(f, exprs, "; ")?;
                f.write_str(" }")
            }
            Expr::Unit => f.write_str("()"),
            Expr::Foreign(leaf) => write!(f, "<{}>", leaf.0.kind()),
        }
    }
}
