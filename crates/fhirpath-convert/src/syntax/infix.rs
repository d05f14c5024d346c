//! Infix formula grammar.
//!
//! ```text
//! expr      := level(implies)
//! level(p)  := level(p+1) (ws op(p) ws level(p+1))*
//! unary     := ('-' ws)* power
//! power     := atom (ws ('^' | '**') ws ('-' ws)* atom)*
//! atom      := call | group | number | identifier
//! call      := FUNCTION '(' ws expr ws (',' ws expr ws)* ')'
//! group     := '(' ws expr ws ')'
//! ```
//!
//! Exponents chain to the left and bind tighter than unary minus, which binds
//! tighter than every other operator. A function name must touch its `(`.
//! The right operand of an exponent is a single atom: `a^b - c` is
//! `(a^b) - c`.
//!
//! Each level folds into one flat [`Expr::Chain`]. Exponent chains and runs
//! of unary minus are capped at [`MAX_RUN`] so the rewritten tree stays
//! shallow.

use crate::ir::{BinaryOp, Expr, Link, Spacing};
use crate::syntax::common::{operator, word, ws, Extra};
use crate::syntax::MAX_RUN;
use crate::vocab::{self, Precedence};
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Parser for a complete expression, surrounding whitespace included
pub fn expression_parser<'src>() -> impl Parser<'src, &'src str, Expr, Extra<'src>> {
    ws().ignore_then(expr()).then_ignore(ws()).then_ignore(end())
}

/// Parser for an expression with no leading or trailing whitespace
fn expr<'src>() -> impl Parser<'src, &'src str, Expr, Extra<'src>> + Clone {
    recursive(|expr| {
        let args = ws()
            .ignore_then(expr.clone())
            .then_ignore(ws())
            .separated_by(just(','))
            .at_least(1)
            .collect::<Vec<_>>();

        let call = word()
            .then_ignore(just('('))
            .then(args)
            .then_ignore(just(')'))
            .try_map(|(name, args), span| {
                vocab::function(name)
                    .map(|function| Expr::call(function, args))
                    .ok_or_else(|| Rich::custom(span, format!("unknown function '{}'", name)))
            })
            .labelled("function call like ABS(x)");

        let group = just('(')
            .ignore_then(ws())
            .then(expr)
            .then(ws())
            .then_ignore(just(')'))
            .map(|((before, inner), after)| Expr::group(inner, Spacing::new(before, after)))
            .labelled("parenthesized expression");

        let atom = choice((call, group, number_or_identifier())).boxed();

        let negations = just('-')
            .ignore_then(ws())
            .repeated()
            .collect::<Vec<_>>()
            .try_map(|prefixes, span| {
                within_run(prefixes.len(), span, "unary minus").map(|()| prefixes)
            });

        let exponent = negations
            .clone()
            .then(atom.clone())
            .map(|(prefixes, operand)| Expr::negated(prefixes, operand));

        let power = atom
            .then(
                link(operator(Precedence::Power), exponent)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .try_map(|(first, links), span| {
                within_run(links.len(), span, "exponent").map(|()| Expr::chain(first, links))
            });

        let mut level = negations
            .then(power)
            .map(|(prefixes, operand)| Expr::negated(prefixes, operand))
            .boxed();

        for precedence in Precedence::FOLDED.into_iter().rev() {
            level = binary_level(level, precedence).boxed();
        }

        level
    })
}

/// `ws op ws operand`, kept as one chain link
fn link<'src, O, P>(op: O, operand: P) -> impl Parser<'src, &'src str, Link, Extra<'src>> + Clone
where
    O: Parser<'src, &'src str, BinaryOp, Extra<'src>> + Clone,
    P: Parser<'src, &'src str, Expr, Extra<'src>> + Clone,
{
    ws()
        .then(op)
        .then(ws())
        .then(operand)
        .map(|(((before, op), after), operand)| Link::new(op, Spacing::new(before, after), operand))
}

/// Flat chain of operands joined by operators of one level
fn binary_level<'src, P>(
    operand: P,
    level: Precedence,
) -> impl Parser<'src, &'src str, Expr, Extra<'src>> + Clone
where
    P: Parser<'src, &'src str, Expr, Extra<'src>> + Clone,
{
    operand
        .clone()
        .then(link(operator(level), operand).repeated().collect::<Vec<_>>())
        .map(|(first, links)| Expr::chain(first, links))
}

fn within_run<'src>(
    len: usize,
    span: SimpleSpan,
    what: &str,
) -> Result<(), Rich<'src, char>> {
    if len > MAX_RUN {
        Err(Rich::custom(
            span,
            format!("more than {} consecutive {} operators", MAX_RUN, what),
        ))
    } else {
        Ok(())
    }
}

/// Parser for a number (`3`, `4.2`, `1e5`) or a bare identifier (`HeartRate2`)
fn number_or_identifier<'src>() -> impl Parser<'src, &'src str, Expr, Extra<'src>> + Clone {
    word()
        .then(just('.').ignore_then(word()).or_not())
        .try_map(|(head, fraction), span| classify_word(head, fraction).ok_or_else(|| {
            Rich::custom(span, "'.' is only allowed inside a number")
        }))
}

fn classify_word(head: &str, fraction: Option<&str>) -> Option<Expr> {
    match fraction {
        None if is_mantissa(head) => Some(Expr::number(head)),
        None => Some(Expr::identifier(head)),
        Some(fraction) if is_digits(head) && is_mantissa(fraction) => {
            Some(Expr::number(format!("{}.{}", head, fraction)))
        }
        Some(_) => None,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Digits with an optional exponent suffix (`12`, `12e3`)
fn is_mantissa(s: &str) -> bool {
    match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => is_digits(&s[..i]) && is_digits(&s[i + 1..]),
        None => is_digits(s),
    }
}
