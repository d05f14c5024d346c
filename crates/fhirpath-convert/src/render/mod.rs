//! Target renderers for the expression tree.
//!
//! Renderers turn a rewritten [`Expr`] into target-syntax text.

mod fhirpath;

pub use fhirpath::{FhirPathRenderer, DEFAULT_SIGIL};

use crate::error::RenderError;
use crate::ir::Expr;

/// Trait for rendering an expression tree to a target syntax.
pub trait ExprRenderer: Send + Sync {
    /// Unique name for this renderer
    fn name(&self) -> &str;

    /// Render the tree to text
    fn render(&self, expr: &Expr) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRenderer;

    impl ExprRenderer for MockRenderer {
        fn name(&self) -> &str {
            "mock"
        }

        fn render(&self, _expr: &Expr) -> Result<String, RenderError> {
            Ok("1".to_string())
        }
    }

    #[test]
    fn test_mock_renderer() {
        let renderer: Box<dyn ExprRenderer> = Box::new(MockRenderer);
        let result = renderer.render(&Expr::number("2")).unwrap();

        assert_eq!(renderer.name(), "mock");
        assert_eq!(result, "1");
    }
}
