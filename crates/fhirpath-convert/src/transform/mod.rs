//! Tree transforms.
//!
//! Each transform is a pure `Expr -> Expr` rule applied bottom-up. The
//! standard pipeline rewrites, in order: exponent operators, unary math
//! functions, the binary log function, and logical operator spellings.

mod functions;
mod logical;
mod power;
mod validate;

pub use functions::{FunctionTransform, LogTransform};
pub use logical::LogicalTransform;
pub use power::PowerTransform;
pub use validate::ValidateTransform;

use crate::error::TransformError;
use crate::ir::Expr;
use std::sync::Arc;
use tracing::trace;

/// Trait for tree transforms.
pub trait ExprTransform: Send + Sync {
    /// Unique name for this transform
    fn name(&self) -> &'static str;

    /// Rewrite the tree, or refuse it
    fn transform(&self, expr: Expr) -> Result<Expr, TransformError>;
}

/// Ordered list of transforms applied one after another.
#[derive(Clone, Default)]
pub struct TransformPipeline {
    transforms: Vec<Arc<dyn ExprTransform>>,
}

impl TransformPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// The rewrite rules, in their declared order
    pub fn standard() -> Self {
        Self::new()
            .with_transform(PowerTransform)
            .with_transform(FunctionTransform)
            .with_transform(LogTransform)
            .with_transform(LogicalTransform)
    }

    /// Append a transform
    pub fn with_transform(mut self, transform: impl ExprTransform + 'static) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }

    /// Insert a transform ahead of the others
    pub fn preceded_by(mut self, transform: impl ExprTransform + 'static) -> Self {
        self.transforms.insert(0, Arc::new(transform));
        self
    }

    /// Run every transform in order
    pub fn run(&self, expr: Expr) -> Result<Expr, TransformError> {
        self.transforms.iter().try_fold(expr, |expr, transform| {
            trace!(transform = transform.name(), "applying transform");
            transform.transform(expr)
        })
    }

    /// Names of the registered transforms, in order
    pub fn transform_names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTransform {
        name: &'static str,
    }

    impl ExprTransform for MockTransform {
        fn name(&self) -> &'static str {
            self.name
        }

        fn transform(&self, expr: Expr) -> Result<Expr, TransformError> {
            Ok(Expr::tight_group(expr))
        }
    }

    #[test]
    fn test_standard_order() {
        let pipeline = TransformPipeline::standard();
        assert_eq!(
            pipeline.transform_names(),
            vec!["power", "functions", "log", "logical"]
        );
    }

    #[test]
    fn test_preceded_by() {
        let pipeline = TransformPipeline::standard().preceded_by(MockTransform { name: "first" });
        assert_eq!(pipeline.transform_names()[0], "first");
    }

    #[test]
    fn test_run_applies_in_order() {
        let pipeline = TransformPipeline::new()
            .with_transform(MockTransform { name: "one" })
            .with_transform(MockTransform { name: "two" });
        let result = pipeline.run(Expr::number("1")).unwrap();
        assert_eq!(
            result,
            Expr::tight_group(Expr::tight_group(Expr::number("1")))
        );
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let result = TransformPipeline::new().run(Expr::identifier("a")).unwrap();
        assert_eq!(result, Expr::identifier("a"));
    }
}
