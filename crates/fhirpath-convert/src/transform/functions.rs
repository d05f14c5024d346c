//! Function-call rewrites.
//!
//! - `FUNC(x)` becomes `(x).func()` for the unary math functions.
//! - `LOG(base, value)` becomes `(value).log(base)`.
//!
//! Both rely on call arity having been checked; a call with the wrong number
//! of arguments is refused rather than guessed at.

use crate::error::TransformError;
use crate::ir::Expr;
use crate::transform::ExprTransform;
use crate::vocab::Function;

/// Rewrites unary math function calls into method calls.
pub struct FunctionTransform;

impl ExprTransform for FunctionTransform {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn transform(&self, expr: Expr) -> Result<Expr, TransformError> {
        expr.try_rewrite(&mut |node| match node {
            Expr::Call { function, args } if function != Function::Log => {
                let [arg] = exact_args::<1>(function, args)?;
                Ok(Expr::method(Expr::tight_group(arg), function.method_name(), Vec::new()))
            }
            other => Ok(other),
        })
    }
}

/// Rewrites `LOG(base, value)` into `(value).log(base)`.
pub struct LogTransform;

impl ExprTransform for LogTransform {
    fn name(&self) -> &'static str {
        "log"
    }

    fn transform(&self, expr: Expr) -> Result<Expr, TransformError> {
        expr.try_rewrite(&mut |node| match node {
            Expr::Call {
                function: Function::Log,
                args,
            } => {
                let [base, value] = exact_args::<2>(Function::Log, args)?;
                Ok(Expr::method(Expr::tight_group(value), "log", vec![base]))
            }
            other => Ok(other),
        })
    }
}

fn exact_args<const N: usize>(
    function: Function,
    args: Vec<Expr>,
) -> Result<[Expr; N], TransformError> {
    let found = args.len();
    args.try_into().map_err(|_| TransformError::Arity {
        function,
        expected: N,
        found,
    })
}
