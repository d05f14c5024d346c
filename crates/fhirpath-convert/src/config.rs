//! Converter configuration.
//!
//! ```toml
//! variables = ["Patient", "HeartRate", "Age"]
//! sigil = "%"
//! ```
//!
//! The same shape is accepted as JSON. Files are told apart by extension.

use crate::render::DEFAULT_SIGIL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sigil '{0}' must be an ASCII punctuation character")]
    InvalidSigil(char),
}

/// Settings shared by every conversion a [`Converter`](crate::Converter) performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Identifiers the input may reference
    pub variables: Vec<String>,
    /// Prefix written before each variable in the output
    pub sigil: char,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            variables: Vec::new(),
            sigil: DEFAULT_SIGIL,
        }
    }
}

impl ConverterConfig {
    pub fn with_variables<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(input)?.validated()
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(input)?.validated()
    }

    /// A sigil that could be part of an identifier run would be re-tagged on
    /// every pass.
    fn validated(self) -> Result<Self, ConfigError> {
        if self.sigil.is_ascii_punctuation() {
            Ok(self)
        } else {
            Err(ConfigError::InvalidSigil(self.sigil))
        }
    }

    /// Load from a `.json` file, or from TOML for any other extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Append variables not already present, keeping first-seen order.
    pub fn merge_variables<I, S>(&mut self, variables: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for variable in variables {
            let variable = variable.into();
            if !self.variables.contains(&variable) {
                self.variables.push(variable);
            }
        }
    }
}
