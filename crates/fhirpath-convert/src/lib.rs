//! Infix formula to FHIRPath conversion.
//!
//! Converts human-friendly formulas over a fixed set of variables into
//! FHIRPath expressions:
//!
//! ```
//! use fhirpath_convert::convert_expression;
//!
//! let out = convert_expression("CEILING(a+b) ** ABS(c^2)", &["a", "b", "c"]);
//! assert_eq!(
//!     out.as_deref(),
//!     Some("(%a+%b).ceiling().power((%c.power(2)).abs())")
//! );
//! assert_eq!(convert_expression("a + z", &["a"]), None);
//! ```
//!
//! Conversion runs in stages:
//! 1. [`syntax`] parses the text into an [`Expr`] tree
//! 2. [`transform::ValidateTransform`] resolves identifiers against the allow-list
//! 3. [`transform::TransformPipeline::standard`] rewrites exponents, functions
//!    and logical operators
//! 4. [`render::FhirPathRenderer`] emits the result, tagging variables

pub mod config;
pub mod error;
pub mod ir;
pub mod pipeline;
pub mod render;
pub mod syntax;
pub mod tag;
pub mod transform;
pub mod vocab;

pub use config::{ConfigError, ConverterConfig};
pub use error::{ConvertError, ParseError, RenderError, TransformError};
pub use ir::Expr;
pub use pipeline::Converter;
pub use render::DEFAULT_SIGIL;

/// Convert `expression`, or `None` if it is rejected.
pub fn convert_expression<S: AsRef<str>>(expression: &str, variables: &[S]) -> Option<String> {
    Converter::new(variables.iter().map(|v| v.as_ref().to_string())).convert(expression)
}

/// True if `expression` is well-formed and only references `variables`.
pub fn validate<S: AsRef<str>>(expression: &str, variables: &[S]) -> bool {
    Converter::new(variables.iter().map(|v| v.as_ref().to_string())).validate(expression)
}

/// Apply the syntactic rewrites without tagging or checking identifiers.
pub fn rewrite(expression: &str) -> Result<String, ConvertError> {
    Converter::default().rewrite(expression)
}

/// Prefix every occurrence of an allow-listed identifier with `%`.
pub fn tag<S: AsRef<str>>(expression: &str, variables: &[S]) -> String {
    tag::tag_with(expression, variables, DEFAULT_SIGIL)
}
