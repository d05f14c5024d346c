//! FHIRPath renderer.
//!
//! Emits a rewritten tree as FHIRPath text:
//! - resolved variables get the reference sigil (`%a`)
//! - method calls render as `receiver.method(args)`
//! - whitespace captured by the parser is reproduced as written

use crate::error::RenderError;
use crate::ir::Expr;
use crate::render::ExprRenderer;
use crate::vocab::OperatorKind;

/// Default reference sigil for external variables.
pub const DEFAULT_SIGIL: char = '%';

/// FHIRPath renderer with a configurable reference sigil.
#[derive(Debug, Clone)]
pub struct FhirPathRenderer {
    /// Prefix written before every resolved variable
    pub sigil: char,
}

impl Default for FhirPathRenderer {
    fn default() -> Self {
        Self {
            sigil: DEFAULT_SIGIL,
        }
    }
}

impl FhirPathRenderer {
    pub fn with_sigil(sigil: char) -> Self {
        Self { sigil }
    }

    fn write(&self, expr: &Expr, out: &mut String) -> Result<(), RenderError> {
        match expr {
            Expr::Number(text) | Expr::Identifier(text) => out.push_str(text),
            Expr::Variable(name) => {
                out.push(self.sigil);
                out.push_str(name);
            }
            Expr::Negate { operand, spacing } => {
                out.push('-');
                out.push_str(spacing);
                self.write(operand, out)?;
            }
            Expr::Group { inner, spacing } => {
                out.push('(');
                out.push_str(&spacing.before);
                self.write(inner, out)?;
                out.push_str(&spacing.after);
                out.push(')');
            }
            Expr::Chain { first, links } => {
                self.write(first, out)?;
                for link in links {
                    if link.op.kind == OperatorKind::Power {
                        return Err(RenderError::Unlowered {
                            construct: format!("exponent operator '{}'", link.op.spelling),
                        });
                    }
                    out.push_str(&link.spacing.before);
                    out.push_str(&link.op.spelling);
                    out.push_str(&link.spacing.after);
                    self.write(&link.operand, out)?;
                }
            }
            Expr::Call { function, .. } => {
                return Err(RenderError::Unlowered {
                    construct: format!("function call '{}'", function),
                });
            }
            Expr::Method {
                receiver,
                method,
                args,
            } => {
                self.write(receiver, out)?;
                out.push('.');
                out.push_str(method);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(arg, out)?;
                }
                out.push(')');
            }
        }
        Ok(())
    }
}

impl ExprRenderer for FhirPathRenderer {
    fn name(&self) -> &str {
        "fhirpath"
    }

    fn render(&self, expr: &Expr) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write(expr, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BinaryOp, Link, Spacing};
    use crate::vocab::Function;

    fn render(expr: &Expr) -> String {
        FhirPathRenderer::default().render(expr).unwrap()
    }

    #[test]
    fn test_render_variable_with_sigil() {
        assert_eq!(render(&Expr::variable("HeartRate")), "%HeartRate");
    }

    #[test]
    fn test_render_custom_sigil() {
        let renderer = FhirPathRenderer::with_sigil('$');
        assert_eq!(renderer.render(&Expr::variable("a")).unwrap(), "$a");
    }

    #[test]
    fn test_render_identifier_bare() {
        assert_eq!(render(&Expr::identifier("a")), "a");
    }

    #[test]
    fn test_render_binary_spacing() {
        let expr = Expr::binary(
            Expr::variable("a"),
            BinaryOp::new(OperatorKind::LessOrEqual, "<="),
            Expr::number("3"),
            Spacing::new(" ", "  "),
        );
        assert_eq!(render(&expr), "%a <=  3");
    }

    #[test]
    fn test_render_chain_links_in_order() {
        let expr = Expr::chain(
            Expr::variable("a"),
            vec![
                Link::new(
                    BinaryOp::new(OperatorKind::Subtract, "-"),
                    Spacing::default(),
                    Expr::variable("b"),
                ),
                Link::new(
                    BinaryOp::new(OperatorKind::Add, "+"),
                    Spacing::new(" ", " "),
                    Expr::number("1"),
                ),
            ],
        );
        assert_eq!(render(&expr), "%a-%b + 1");
    }

    #[test]
    fn test_render_method_chain() {
        let expr = Expr::method(
            Expr::method(Expr::number("3.3"), "power", vec![Expr::number("4.2")]),
            "power",
            vec![Expr::negate(Expr::number("1"), "")],
        );
        assert_eq!(render(&expr), "3.3.power(4.2).power(-1)");
    }

    #[test]
    fn test_render_group_spacing() {
        let expr = Expr::group(Expr::variable("a"), Spacing::new(" ", ""));
        assert_eq!(render(&expr), "( %a)");
    }

    #[test]
    fn test_render_negate_spacing() {
        assert_eq!(render(&Expr::negate(Expr::variable("a"), " ")), "- %a");
    }

    #[test]
    fn test_render_refuses_call() {
        let expr = Expr::call(Function::Abs, vec![Expr::variable("a")]);
        let result = FhirPathRenderer::default().render(&expr);

        assert!(matches!(result, Err(RenderError::Unlowered { .. })));
    }

    #[test]
    fn test_render_refuses_power_operator() {
        let expr = Expr::binary(
            Expr::variable("a"),
            BinaryOp::new(OperatorKind::Power, "**"),
            Expr::variable("b"),
            Spacing::default(),
        );
        let err = FhirPathRenderer::default().render(&expr).unwrap_err();

        assert_eq!(
            err.to_string(),
            "exponent operator '**' must be rewritten before rendering"
        );
    }
}
