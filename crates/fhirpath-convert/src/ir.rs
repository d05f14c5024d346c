//! Expression tree shared by every pipeline stage.
//!
//! Parsing produces an `Expr`; transforms consume and rebuild it; the renderer
//! turns it back into text. Nodes keep the whitespace the author wrote around
//! operators and inside groups so untouched text renders verbatim.
//!
//! Operators of one precedence level are kept as a flat [`Expr::Chain`], so a
//! long sum is one wide node rather than a deep left spine.

use crate::vocab::{Function, OperatorKind};
use serde::Serialize;

/// Whitespace captured on either side of a token pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Spacing {
    pub before: String,
    pub after: String,
}

impl Spacing {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// A binary operator together with the spelling it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryOp {
    pub kind: OperatorKind,
    pub spelling: String,
}

impl BinaryOp {
    pub fn new(kind: OperatorKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
        }
    }

    /// True when the spelling is a word (`and`, `XOR`) rather than symbols.
    pub fn is_keyword(&self) -> bool {
        self.spelling.chars().all(|c| c.is_ascii_alphabetic())
    }
}

/// One `op operand` step of a chain; `spacing` surrounds the operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub op: BinaryOp,
    pub spacing: Spacing,
    pub operand: Expr,
}

impl Link {
    pub fn new(op: BinaryOp, spacing: Spacing, operand: Expr) -> Self {
        Self {
            op,
            spacing,
            operand,
        }
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", content = "data", rename_all = "snake_case")]
pub enum Expr {
    /// Numeric literal exactly as written (`3`, `4.2`, `1e5`)
    Number(String),
    /// Identifier not yet checked against an allow-list
    Identifier(String),
    /// Identifier resolved against the allow-list
    Variable(String),
    /// Prefix minus; `spacing` is the whitespace after the `-`
    Negate { operand: Box<Expr>, spacing: String },
    /// Parenthesized expression; `spacing` is inside the parentheses
    Group { inner: Box<Expr>, spacing: Spacing },
    /// Left-associative run of same-precedence operations: `a + b - c`.
    /// Never built with an empty `links`.
    Chain { first: Box<Expr>, links: Vec<Link> },
    /// Function call in input form: `ABS(x)`
    Call { function: Function, args: Vec<Expr> },
    /// Method call in target form: `(x).abs()`
    Method {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn number(text: impl Into<String>) -> Self {
        Expr::Number(text.into())
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn negate(operand: Expr, spacing: impl Into<String>) -> Self {
        Expr::Negate {
            operand: Box::new(operand),
            spacing: spacing.into(),
        }
    }

    /// Wrap `operand` in one `Negate` per prefix, outermost first.
    pub fn negated(prefixes: Vec<String>, operand: Expr) -> Self {
        prefixes
            .into_iter()
            .rev()
            .fold(operand, |inner, spacing| Expr::negate(inner, spacing))
    }

    pub fn group(inner: Expr, spacing: Spacing) -> Self {
        Expr::Group {
            inner: Box::new(inner),
            spacing,
        }
    }

    /// Parenthesize without any inner whitespace.
    pub fn tight_group(inner: Expr) -> Self {
        Expr::group(inner, Spacing::default())
    }

    /// `first` followed by `links`, or `first` alone when there are none.
    pub fn chain(first: Expr, links: Vec<Link>) -> Self {
        if links.is_empty() {
            first
        } else {
            Expr::Chain {
                first: Box::new(first),
                links,
            }
        }
    }

    /// A single infix operation.
    pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr, spacing: Spacing) -> Self {
        Expr::chain(lhs, vec![Link::new(op, spacing, rhs)])
    }

    pub fn call(function: Function, args: Vec<Expr>) -> Self {
        Expr::Call { function, args }
    }

    pub fn method(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Method {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        }
    }

    /// True for a chain whose operators are all of `kind`.
    pub fn is_chain_of(&self, kind: OperatorKind) -> bool {
        matches!(self, Expr::Chain { links, .. } if links.iter().all(|link| link.op.kind == kind))
    }

    /// Rebuild the tree bottom-up, applying `f` to every node after its
    /// children have been rebuilt.
    pub fn try_rewrite<E>(self, f: &mut impl FnMut(Expr) -> Result<Expr, E>) -> Result<Expr, E> {
        let rebuilt = match self {
            leaf @ (Expr::Number(_) | Expr::Identifier(_) | Expr::Variable(_)) => leaf,
            Expr::Negate { operand, spacing } => Expr::Negate {
                operand: Box::new(operand.try_rewrite(f)?),
                spacing,
            },
            Expr::Group { inner, spacing } => Expr::Group {
                inner: Box::new(inner.try_rewrite(f)?),
                spacing,
            },
            Expr::Chain { first, links } => Expr::Chain {
                first: Box::new(first.try_rewrite(f)?),
                links: links
                    .into_iter()
                    .map(|link| {
                        Ok(Link {
                            operand: link.operand.try_rewrite(f)?,
                            ..link
                        })
                    })
                    .collect::<Result<_, E>>()?,
            },
            Expr::Call { function, args } => Expr::Call {
                function,
                args: rewrite_all(args, f)?,
            },
            Expr::Method {
                receiver,
                method,
                args,
            } => Expr::Method {
                receiver: Box::new(receiver.try_rewrite(f)?),
                method,
                args: rewrite_all(args, f)?,
            },
        };
        f(rebuilt)
    }
}

fn rewrite_all<E>(
    args: Vec<Expr>,
    f: &mut impl FnMut(Expr) -> Result<Expr, E>,
) -> Result<Vec<Expr>, E> {
    args.into_iter().map(|arg| arg.try_rewrite(f)).collect()
}
