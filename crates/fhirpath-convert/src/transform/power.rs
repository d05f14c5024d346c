//! Exponent rewrite: `a ^ b` and `a ** b` become `a.power(b)`.

use crate::error::TransformError;
use crate::ir::Expr;
use crate::transform::ExprTransform;
use crate::vocab::OperatorKind;

/// Rewrites both exponent spellings into `.power()` calls.
pub struct PowerTransform;

impl ExprTransform for PowerTransform {
    fn name(&self) -> &'static str {
        "power"
    }

    fn transform(&self, expr: Expr) -> Result<Expr, TransformError> {
        expr.try_rewrite(&mut |node| {
            Ok(match node {
                // Spacing around the operator is dropped with it
                Expr::Chain { first, links }
                    if links.iter().all(|link| link.op.kind == OperatorKind::Power) =>
                {
                    links.into_iter().fold(*first, |base, link| {
                        Expr::method(base, "power", vec![link.operand])
                    })
                }
                other => other,
            })
        })
    }
}
