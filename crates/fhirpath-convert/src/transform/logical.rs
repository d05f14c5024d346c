//! Logical operator normalization.
//!
//! `OR`, `||` become `or`; `AND`, `&&` become `and`. `XOR` and `IMPLIES` keep
//! the spelling they were written in.

use crate::error::TransformError;
use crate::ir::{BinaryOp, Expr, Link, Spacing};
use crate::transform::ExprTransform;

/// Rewrites alternate `and`/`or` spellings into the lower-case keywords.
pub struct LogicalTransform;

impl ExprTransform for LogicalTransform {
    fn name(&self) -> &'static str {
        "logical"
    }

    fn transform(&self, expr: Expr) -> Result<Expr, TransformError> {
        expr.try_rewrite(&mut |node| {
            Ok(match node {
                Expr::Chain { first, links } => Expr::Chain {
                    first,
                    links: links
                        .into_iter()
                        .map(|link| {
                            let (op, spacing) = normalize(link.op, link.spacing);
                            Link::new(op, spacing, link.operand)
                        })
                        .collect(),
                },
                other => other,
            })
        })
    }
}

fn normalize(op: BinaryOp, spacing: Spacing) -> (BinaryOp, Spacing) {
    let Some(keyword) = op.kind.canonical_keyword() else {
        return (op, spacing);
    };
    if op.spelling == keyword {
        return (op, spacing);
    }

    // `a||b` would otherwise render as `aorb`
    let pad = |side: String| if side.is_empty() { " ".to_string() } else { side };
    let spacing = if op.is_keyword() {
        spacing
    } else {
        Spacing::new(pad(spacing.before), pad(spacing.after))
    };
    (BinaryOp::new(op.kind, keyword), spacing)
}
