//! Error types for each pipeline stage.
//!
//! None of these reach the top-level `convert` contract, which only reports
//! accept or reject. They exist so each stage can be composed and tested on
//! its own, and so rejections can be logged.

use crate::vocab::Function;
use thiserror::Error;

/// The input does not match the expression grammar.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid expression:\n{errors}")]
    Syntax { errors: String },

    #[error("parentheses nest {depth} deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// A transform refused the tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("identifier '{name}' is not an allowed variable")]
    UnknownIdentifier { name: String },

    #[error("{function} takes {expected} argument(s), found {found}")]
    Arity {
        function: Function,
        expected: usize,
        found: usize,
    },
}

/// The renderer met a node the target syntax cannot express.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("{construct} must be rewritten before rendering")]
    Unlowered { construct: String },
}

/// Any failure along the conversion pipeline.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
