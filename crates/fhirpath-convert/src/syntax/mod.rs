//! Input syntax parsing.
//!
//! Turns infix formula text into an [`Expr`] tree. This is the structural half
//! of validation: character legality, operand adjacency, parenthesis balance
//! and call shape all fail here. Whether identifiers are allowed is decided
//! later by [`ValidateTransform`](crate::transform::ValidateTransform).
//!
//! Parenthesis depth is capped at [`MAX_NESTING`], and runs of `^` or unary
//! minus at [`MAX_RUN`]. Everything else recurses only through those, so
//! the tree depth is bounded regardless of input length.

mod common;
mod infix;

pub use common::format_errors;

use crate::error::ParseError;
use crate::ir::Expr;
use chumsky::Parser;

/// Deepest parenthesis nesting accepted, counting call parentheses.
pub const MAX_NESTING: usize = 64;

/// Longest run of exponent operators or prefix minuses accepted.
pub const MAX_RUN: usize = 32;

const RED_ZONE: usize = 16 * 1024 * 1024;
const STACK_SIZE: usize = 32 * 1024 * 1024;

/// Run `f` with enough stack to parse, rewrite and render a tree at the
/// nesting limits.
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SIZE, f)
}

/// Parse an infix expression into a tree.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let depth = nesting_depth(input);
    if depth > MAX_NESTING {
        return Err(ParseError::TooDeep {
            depth,
            limit: MAX_NESTING,
        });
    }

    with_stack(|| {
        infix::expression_parser()
            .parse(input)
            .into_result()
            .map_err(|errs| ParseError::Syntax {
                errors: format_errors(&errs, input),
            })
    })
}

/// Deepest count of open parentheses; unbalanced closers are left to the
/// grammar.
fn nesting_depth(input: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for byte in input.bytes() {
        match byte {
            b'(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
