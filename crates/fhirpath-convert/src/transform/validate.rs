//! Validation transform.
//!
//! Resolves every identifier against the variable allow-list and checks call
//! arity. Runs before any rewrite rule.

use crate::error::TransformError;
use crate::ir::Expr;
use crate::transform::ExprTransform;
use std::collections::HashSet;

/// Validation transform that resolves identifiers into variables.
#[derive(Debug, Clone, Default)]
pub struct ValidateTransform {
    variables: HashSet<String>,
}

impl ValidateTransform {
    pub fn new<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, name: &str) -> bool {
        self.variables.contains(name)
    }
}

impl ExprTransform for ValidateTransform {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn transform(&self, expr: Expr) -> Result<Expr, TransformError> {
        expr.try_rewrite(&mut |node| match node {
            Expr::Identifier(name) if self.allows(&name) => Ok(Expr::Variable(name)),
            Expr::Identifier(name) => Err(TransformError::UnknownIdentifier { name }),
            Expr::Call { function, args } if args.len() != function.arity() => {
                Err(TransformError::Arity {
                    function,
                    expected: function.arity(),
                    found: args.len(),
                })
            }
            other => Ok(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Function;

    #[test]
    fn test_validate_resolves_variables() {
        let transform = ValidateTransform::new(["a"]);
        let result = transform.transform(Expr::identifier("a")).unwrap();

        assert_eq!(result, Expr::variable("a"));
    }

    #[test]
    fn test_validate_rejects_unknown_identifier() {
        let transform = ValidateTransform::new(["a", "b"]);
        let expr = Expr::call(Function::Abs, vec![Expr::identifier("z")]);

        assert_eq!(
            transform.transform(expr),
            Err(TransformError::UnknownIdentifier {
                name: "z".to_string()
            })
        );
    }

    #[test]
    fn test_validate_is_case_sensitive() {
        let transform = ValidateTransform::new(["Age"]);
        assert!(transform.transform(Expr::identifier("age")).is_err());
    }

    #[test]
    fn test_validate_checks_log_arity() {
        let transform = ValidateTransform::new(["a"]);
        let expr = Expr::call(Function::Log, vec![Expr::identifier("a")]);

        assert_eq!(
            transform.transform(expr),
            Err(TransformError::Arity {
                function: Function::Log,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_validate_checks_unary_arity() {
        let transform = ValidateTransform::new(["a", "b"]);
        let expr = Expr::call(
            Function::Abs,
            vec![Expr::identifier("a"), Expr::identifier("b")],
        );

        assert!(matches!(
            transform.transform(expr),
            Err(TransformError::Arity { found: 2, .. })
        ));
    }

    #[test]
    fn test_validate_leaves_numbers() {
        let transform = ValidateTransform::default();
        let result = transform.transform(Expr::number("3.3")).unwrap();

        assert_eq!(result, Expr::number("3.3"));
    }
}
