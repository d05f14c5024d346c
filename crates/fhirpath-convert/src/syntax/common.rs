//! Shared parser primitives for the infix grammar.
//!
//! Character-level chumsky parsers: whitespace capture, alphanumeric runs,
//! operator spellings, and error formatting.

use crate::ir::BinaryOp;
use crate::vocab::{self, Precedence};
use chumsky::extra;
use chumsky::prelude::*;

/// Extra type for parsers - uses Rich errors for better messages
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

// ============================================================================
// Primitive parsers
// ============================================================================

/// Parser for a (possibly empty) whitespace run, captured verbatim
pub fn ws<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_whitespace())
        .repeated()
        .to_slice()
        .map(|s: &str| s.to_string())
}

/// Parser for a maximal run of ASCII letters and digits
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric())
        .repeated()
        .at_least(1)
        .to_slice()
        .labelled("identifier or number")
}

/// Parser for a maximal run of characters that only occur in symbolic
/// operators (`+`, `**`, `!=`, ...)
fn symbol_run<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| vocab::is_operator_char(*c))
        .repeated()
        .at_least(1)
        .to_slice()
}

/// Parser for an operator spelling of the given precedence level.
///
/// The candidate token is a whole symbol run, a lone `-`, or a whole word, so
/// `++` or `=<` never split into two valid operators and `andx` is not `and`.
pub fn operator<'src>(
    level: Precedence,
) -> impl Parser<'src, &'src str, BinaryOp, Extra<'src>> + Clone {
    choice((symbol_run(), just('-').to_slice(), word()))
        .try_map(move |spelling: &str, span| match vocab::operator(spelling) {
            Some(kind) if kind.precedence() == level => Ok(BinaryOp::new(kind, spelling)),
            _ => Err(Rich::custom(
                span,
                format!("expected {} operator, found '{}'", level, spelling),
            )),
        })
        .labelled("operator")
}

// ============================================================================
// Error formatting
// ============================================================================

/// One-based line and column of a byte offset; columns count characters.
pub fn line_col(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}

/// Render parse errors one per line as `line:column: reason`.
pub fn format_errors(errs: &[Rich<'_, char>], input: &str) -> String {
    let mut out = Vec::with_capacity(errs.len());
    for err in errs {
        let (line, col) = line_col(input, err.span().start);
        let found = match err.found() {
            Some(c) => format!("'{}'", c.escape_debug()),
            None => "end of input".to_string(),
        };
        out.push(format!("{}:{}: {}, found {}", line, col, err.reason(), found));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::OperatorKind;

    // =========================================================================
    // Primitive parser tests
    // =========================================================================

    #[test]
    fn test_ws_captures_verbatim() {
        let result = ws().parse(" \t ").into_result();
        assert_eq!(result.unwrap(), " \t ");
    }

    #[test]
    fn test_ws_empty() {
        let result = ws().parse("").into_result();
        assert_eq!(result.unwrap(), "");
    }

    #[test]
    fn test_word_alphanumeric() {
        let result = word().parse("HeartRate2").into_result();
        assert_eq!(result.unwrap(), "HeartRate2");
    }

    #[test]
    fn test_word_rejects_underscore() {
        let result = word().parse("heart_rate").into_result();
        assert!(result.is_err());
    }

    // =========================================================================
    // Operator tests
    // =========================================================================

    #[test]
    fn test_operator_symbolic() {
        let op = operator(Precedence::Relational)
            .parse("<=")
            .into_result()
            .unwrap();
        assert_eq!(op.kind, OperatorKind::LessOrEqual);
        assert_eq!(op.spelling, "<=");
    }

    #[test]
    fn test_operator_double_star() {
        let op = operator(Precedence::Power).parse("**").into_result().unwrap();
        assert_eq!(op.kind, OperatorKind::Power);
    }

    #[test]
    fn test_operator_keyword() {
        let op = operator(Precedence::Or).parse("XOR").into_result().unwrap();
        assert_eq!(op.kind, OperatorKind::Xor);
    }

    #[test]
    fn test_operator_minus() {
        let op = operator(Precedence::Additive).parse("-").into_result().unwrap();
        assert_eq!(op.kind, OperatorKind::Subtract);
    }

    #[test]
    fn test_operator_wrong_level() {
        let result = operator(Precedence::Additive).parse("*").into_result();
        assert!(result.is_err());
    }

    #[test]
    fn test_operator_doubled_symbol() {
        let result = operator(Precedence::Additive).parse("++").into_result();
        assert!(result.is_err());
    }

    #[test]
    fn test_operator_keyword_prefix_is_not_keyword() {
        let result = operator(Precedence::And).parse("andx").into_result();
        assert!(result.is_err());
    }

    // =========================================================================
    // Error position tests
    // =========================================================================

    #[test]
    fn test_line_col_first_line() {
        assert_eq!(line_col("a $", 0), (1, 1));
        assert_eq!(line_col("a $", 2), (1, 3));
    }

    #[test]
    fn test_line_col_right_after_newline() {
        assert_eq!(line_col("a\n$", 2), (2, 1));
        assert_eq!(line_col("a\n\n$", 3), (3, 1));
    }

    #[test]
    fn test_line_col_counts_chars() {
        assert_eq!(line_col("é $", 3), (1, 3));
    }

    #[test]
    fn test_format_errors_reports_position() {
        let errs = operator(Precedence::Additive).parse("$").into_errors();
        let formatted = format_errors(&errs, "$");
        assert!(formatted.starts_with("1:1: "), "{}", formatted);
        assert!(formatted.ends_with("found '$'"), "{}", formatted);
    }
}
