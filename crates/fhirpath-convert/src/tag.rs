//! Text-level variable tagging.
//!
//! Works on already-rewritten text rather than on a tree, so it can be
//! composed with any producer of FHIRPath-like output. A run already preceded
//! by the sigil is left alone, which makes tagging idempotent.

/// A maximal run of ASCII letters and digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierRun<'a> {
    /// Byte offset of the run's first character
    pub start: usize,
    pub text: &'a str,
}

impl IdentifierRun<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Every maximal ASCII alphanumeric run in `text`, left to right.
pub fn identifier_runs(text: &str) -> impl Iterator<Item = IdentifierRun<'_>> + '_ {
    let bytes = text.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos < bytes.len() && !bytes[pos].is_ascii_alphanumeric() {
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphanumeric() {
            pos += 1;
        }
        Some(IdentifierRun {
            start,
            text: &text[start..pos],
        })
    })
}

/// Insert `sigil` before every run equal to one of `variables`.
///
/// Runs already preceded by the sigil, and runs in method-name position
/// (`.name(`), are skipped.
pub fn tag_with<S: AsRef<str>>(expression: &str, variables: &[S], sigil: char) -> String {
    let mut out = String::with_capacity(expression.len() + 8);
    let mut copied = 0;

    for run in identifier_runs(expression) {
        let preceding = expression[..run.start].chars().next_back();
        let following = expression[run.end()..].chars().next();

        if preceding == Some(sigil) {
            continue;
        }
        if preceding == Some('.') && following == Some('(') {
            continue;
        }
        if !variables.iter().any(|v| v.as_ref() == run.text) {
            continue;
        }

        out.push_str(&expression[copied..run.start]);
        out.push(sigil);
        copied = run.start;
    }

    out.push_str(&expression[copied..]);
    out
}
