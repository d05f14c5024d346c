//! Conversion pipeline.
//!
//! `parse -> validate -> rewrite -> render`, with the validate step resolving
//! identifiers so the renderer can tag them.

use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::ir::Expr;
use crate::render::{ExprRenderer, FhirPathRenderer};
use crate::syntax;
use crate::transform::{ExprTransform, TransformPipeline, ValidateTransform};
use tracing::debug;

/// Converts infix formulas to FHIRPath against a fixed variable allow-list.
#[derive(Clone)]
pub struct Converter {
    config: ConverterConfig,
    validate: ValidateTransform,
    convert: TransformPipeline,
    rewrite: TransformPipeline,
    renderer: FhirPathRenderer,
}

impl Default for Converter {
    fn default() -> Self {
        Self::from_config(ConverterConfig::default())
    }
}

impl Converter {
    pub fn new<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_config(ConverterConfig::with_variables(variables))
    }

    pub fn from_config(config: ConverterConfig) -> Self {
        let validate = ValidateTransform::new(config.variables.iter().cloned());
        Self {
            validate: validate.clone(),
            convert: TransformPipeline::standard().preceded_by(validate),
            rewrite: TransformPipeline::standard(),
            renderer: FhirPathRenderer::with_sigil(config.sigil),
            config,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Parse and validate without rewriting.
    pub fn parse(&self, input: &str) -> Result<Expr, ConvertError> {
        syntax::with_stack(|| -> Result<Expr, ConvertError> {
            let expr = syntax::parse(input)?;
            Ok(self.validate.transform(expr)?)
        })
    }

    /// True if `input` would convert.
    pub fn validate(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }

    /// Full conversion, reporting why a rejected input was rejected.
    pub fn try_convert(&self, input: &str) -> Result<String, ConvertError> {
        syntax::with_stack(|| -> Result<String, ConvertError> {
            let expr = syntax::parse(input)?;
            let expr = self.convert.run(expr)?;
            Ok(self.renderer.render(&expr)?)
        })
    }

    /// Full conversion; `None` when the input is rejected.
    pub fn convert(&self, input: &str) -> Option<String> {
        match self.try_convert(input) {
            Ok(output) => {
                debug!(input, output = %output, "converted expression");
                Some(output)
            }
            Err(error) => {
                debug!(input, %error, "rejected expression");
                None
            }
        }
    }

    /// Rewrite without consulting the allow-list; identifiers stay bare.
    pub fn rewrite(&self, input: &str) -> Result<String, ConvertError> {
        syntax::with_stack(|| -> Result<String, ConvertError> {
            let expr = syntax::parse(input)?;
            let expr = self.rewrite.run(expr)?;
            Ok(self.renderer.render(&expr)?)
        })
    }
}
