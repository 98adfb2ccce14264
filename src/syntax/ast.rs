// AST (Abstract Syntax Tree) definitions for expressions

use crate::numeric::Rational;
use crate::value::ForeignValue;
use std::fmt;
use std::rc::Rc;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Function composition (f . g)
    Compose,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "mod",
            BinOp::Pow => "^",
            BinOp::Compose => ".",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Positive, // +x
    Negate,   // -x
    Percent,  // x%
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Positive => "+",
            UnOp::Negate => "-",
            UnOp::Percent => "%",
        }
    }
}

/// Associative-commutative operators, the only ones an n-ary node may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcOp {
    Add,
    Mul,
}

impl AcOp {
    pub fn as_binary(self) -> BinOp {
        match self {
            AcOp::Add => BinOp::Add,
            AcOp::Mul => BinOp::Mul,
        }
    }

    pub fn from_binary(op: BinOp) -> Option<AcOp> {
        match op {
            BinOp::Add => Some(AcOp::Add),
            BinOp::Mul => Some(AcOp::Mul),
            _ => None,
        }
    }

    /// Literal that leaves the operator unchanged
    pub fn identity(self) -> &'static str {
        match self {
            AcOp::Add => "0",
            AcOp::Mul => "1",
        }
    }
}

/// Guard of one piecewise case
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    When(Expr),
    /// The `else` case; always true
    Otherwise,
}

/// One `(predicate, action)` pair of a piecewise function
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub predicate: Predicate,
    pub action: Expr,
}

impl Case {
    pub fn when(predicate: Expr, action: Expr) -> Self {
        Case {
            predicate: Predicate::When(predicate),
            action,
        }
    }

    pub fn otherwise(action: Expr) -> Self {
        Case {
            predicate: Predicate::Otherwise,
            action,
        }
    }
}

/// Opaque leaf owned by an external collaborator (matrix, string atom, ...)
///
/// Two leaves are equal only when they share the same allocation.
#[derive(Clone)]
pub struct ForeignLeaf(pub Rc<dyn ForeignValue>);

impl PartialEq for ForeignLeaf {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ForeignLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForeignLeaf({})", self.0.kind())
    }
}

/// Expression tree
///
/// Trees are never mutated once built; every rewrite pass returns a new tree.
/// `Commutative` nodes are produced only by the rewrite engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Decimal literal text, parsed on evaluation
    Number(String),

    Variable(String),

    Assign {
        name: String,
        value: Box<Expr>,
        is_new_binding: bool,
    },

    Function {
        params: Vec<String>,
        body: Box<Expr>,
    },

    Piecewise(Vec<Case>),

    Apply {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// `a:b:f` binds `a` and `b` ahead of the remaining arguments
    PartialApply {
        bound: Vec<Expr>,
        callee: Box<Expr>,
    },

    Unary {
        operand: Box<Expr>,
        op: UnOp,
        prefix: bool,
    },

    Binary {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        op: BinOp,
    },

    Commutative {
        operands: Vec<Expr>,
        op: AcOp,
    },

    Block(Vec<Expr>),

    Unit,

    Foreign(ForeignLeaf),
}

impl Expr {
    pub fn num(text: impl Into<String>) -> Self {
        Expr::Number(text.into())
    }

    pub fn int(n: i64) -> Self {
        Expr::Number(n.to_string())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assign {
            name: name.into(),
            value: Box::new(value),
            is_new_binding: true,
        }
    }

    pub fn reassign(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assign {
            name: name.into(),
            value: Box::new(value),
            is_new_binding: false,
        }
    }

    pub fn lambda(params: &[&str], body: Expr) -> Self {
        Expr::Function {
            params: params.iter().map(|p| p.to_string()).collect(),
            body: Box::new(body),
        }
    }

    pub fn apply(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Apply {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn partial(bound: Vec<Expr>, callee: Expr) -> Self {
        Expr::PartialApply {
            bound,
            callee: Box::new(callee),
        }
    }

    pub fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        Expr::Binary {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            op,
        }
    }

    pub fn prefix(op: UnOp, operand: Expr) -> Self {
        Expr::Unary {
            operand: Box::new(operand),
            op,
            prefix: true,
        }
    }

    pub fn postfix(operand: Expr, op: UnOp) -> Self {
        Expr::Unary {
            operand: Box::new(operand),
            op,
            prefix: false,
        }
    }

    pub(crate) fn commutative(op: AcOp, operands: Vec<Expr>) -> Self {
        Expr::Commutative { operands, op }
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(lhs, BinOp::Add, rhs)
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(lhs, BinOp::Sub, rhs)
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(lhs, BinOp::Mul, rhs)
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(lhs, BinOp::Div, rhs)
    }

    pub fn pow(lhs: Expr, rhs: Expr) -> Self {
        Expr::binary(lhs, BinOp::Pow, rhs)
    }

    /// Numeric value of a literal node, `None` for anything else or for
    /// malformed literal text
    pub fn literal_value(&self) -> Option<Rational> {
        match self {
            Expr::Number(text) => text.parse().ok(),
            _ => None,
        }
    }

    pub fn is_literal(&self, expected: i64) -> bool {
        self.literal_value()
            .is_some_and(|value| value == Rational::from_integer(expected))
    }

    /// Literal node for a value whose decimal expansion terminates
    pub fn from_rational(value: &Rational) -> Option<Expr> {
        value.to_exact_decimal().map(Expr::Number)
    }

    /// Visit every literal text in the tree, stopping at the first error
    pub fn try_for_each_literal<E>(
        &self,
        f: &mut impl FnMut(&str) -> Result<(), E>,
    ) -> Result<(), E> {
        match self {
            Expr::Number(text) => f(text),
            Expr::Variable(_) | Expr::Unit | Expr::Foreign(_) => Ok(()),
            Expr::Assign { value, .. } => value.try_for_each_literal(f),
            Expr::Function { body, .. } => body.try_for_each_literal(f),
            Expr::Piecewise(cases) => {
                for case in cases {
                    if let Predicate::When(predicate) = &case.predicate {
                        predicate.try_for_each_literal(f)?;
                    }
                    case.action.try_for_each_literal(f)?;
                }
                Ok(())
            }
            Expr::Apply { callee, args } => {
                callee.try_for_each_literal(f)?;
                args.iter().try_for_each(|arg| arg.try_for_each_literal(f))
            }
            Expr::PartialApply { bound, callee } => {
                bound.iter().try_for_each(|arg| arg.try_for_each_literal(f))?;
                callee.try_for_each_literal(f)
            }
            Expr::Unary { operand, .. } => operand.try_for_each_literal(f),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.try_for_each_literal(f)?;
                rhs.try_for_each_literal(f)
            }
            Expr::Commutative { operands, .. } | Expr::Block(operands) => operands
                .iter()
                .try_for_each(|operand| operand.try_for_each_literal(f)),
        }
    }
}
