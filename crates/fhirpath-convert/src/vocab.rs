//! Fixed vocabularies: operator spellings and math function names.
//!
//! Both are process-wide constant lookup tables keyed by spelling. Only the
//! all-lower and all-upper spellings are recognized; `And` or `Ceiling` are
//! ordinary identifiers.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Operators
// ============================================================================

/// Semantic tag for a recognized operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `^` or `**`
    Power,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Equal,
    NotEqual,
    NotEquivalent,
    /// `and`, `AND`, `&&`
    And,
    /// `or`, `OR`, `||`
    Or,
    Xor,
    Implies,
}

/// Binding strength of binary operators, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Implies,
    Or,
    And,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Power,
}

impl Precedence {
    /// Levels folded by the generic binary-level parser, loosest first.
    ///
    /// `Power` is absent: it sits below unary minus and has its own
    /// production.
    pub const FOLDED: [Precedence; 7] = [
        Precedence::Implies,
        Precedence::Or,
        Precedence::And,
        Precedence::Equality,
        Precedence::Relational,
        Precedence::Additive,
        Precedence::Multiplicative,
    ];
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Precedence::Implies => "implies",
            Precedence::Or => "or/xor",
            Precedence::And => "and",
            Precedence::Equality => "equality",
            Precedence::Relational => "relational",
            Precedence::Additive => "additive",
            Precedence::Multiplicative => "multiplicative",
            Precedence::Power => "exponent",
        };
        f.write_str(name)
    }
}

impl OperatorKind {
    pub fn precedence(self) -> Precedence {
        match self {
            OperatorKind::Implies => Precedence::Implies,
            OperatorKind::Or | OperatorKind::Xor => Precedence::Or,
            OperatorKind::And => Precedence::And,
            OperatorKind::Equal | OperatorKind::NotEqual | OperatorKind::NotEquivalent => {
                Precedence::Equality
            }
            OperatorKind::Less
            | OperatorKind::Greater
            | OperatorKind::LessOrEqual
            | OperatorKind::GreaterOrEqual => Precedence::Relational,
            OperatorKind::Add | OperatorKind::Subtract => Precedence::Additive,
            OperatorKind::Multiply | OperatorKind::Divide => Precedence::Multiplicative,
            OperatorKind::Power => Precedence::Power,
        }
    }

    /// Lower-case keyword the target syntax expects, for operators whose
    /// alternate spellings are normalized.
    pub fn canonical_keyword(self) -> Option<&'static str> {
        match self {
            OperatorKind::And => Some("and"),
            OperatorKind::Or => Some("or"),
            _ => None,
        }
    }
}

/// Every recognized operator spelling.
pub static OPERATORS: Lazy<HashMap<&'static str, OperatorKind>> = Lazy::new(|| {
    use OperatorKind::*;
    HashMap::from([
        ("+", Add),
        ("-", Subtract),
        ("*", Multiply),
        ("/", Divide),
        ("^", Power),
        ("**", Power),
        ("||", Or),
        ("&&", And),
        ("<", Less),
        (">", Greater),
        ("=", Equal),
        ("!=", NotEqual),
        ("!~", NotEquivalent),
        (">=", GreaterOrEqual),
        ("<=", LessOrEqual),
        ("xor", Xor),
        ("XOR", Xor),
        ("implies", Implies),
        ("IMPLIES", Implies),
        ("and", And),
        ("AND", And),
        ("or", Or),
        ("OR", Or),
    ])
});

/// Look up an operator by its exact spelling.
pub fn operator(spelling: &str) -> Option<OperatorKind> {
    OPERATORS.get(spelling).copied()
}

/// Characters that can only appear as part of a symbolic operator.
///
/// `-` is excluded because it doubles as the sign of an operand.
pub fn is_operator_char(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '.' | '-' | '(' | ')' | ','))
}

// ============================================================================
// Functions
// ============================================================================

/// Recognized math functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    Ceiling,
    Floor,
    Abs,
    Truncate,
    Exp,
    Sqrt,
    Ln,
    Not,
    /// `LOG(base, value)`
    Log,
}

impl Function {
    /// Unary functions in the order they are rewritten.
    pub const UNARY: [Function; 8] = [
        Function::Ceiling,
        Function::Floor,
        Function::Abs,
        Function::Truncate,
        Function::Exp,
        Function::Sqrt,
        Function::Ln,
        Function::Not,
    ];

    /// Method name in the target syntax.
    pub fn method_name(self) -> &'static str {
        match self {
            Function::Ceiling => "ceiling",
            Function::Floor => "floor",
            Function::Abs => "abs",
            Function::Truncate => "truncate",
            Function::Exp => "exp",
            Function::Sqrt => "sqrt",
            Function::Ln => "ln",
            Function::Not => "not",
            Function::Log => "log",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Function::Log => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Every recognized function spelling.
pub static FUNCTIONS: Lazy<HashMap<&'static str, Function>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for function in Function::UNARY.into_iter().chain([Function::Log]) {
        let lower = function.method_name();
        let upper: &'static str = match function {
            Function::Ceiling => "CEILING",
            Function::Floor => "FLOOR",
            Function::Abs => "ABS",
            Function::Truncate => "TRUNCATE",
            Function::Exp => "EXP",
            Function::Sqrt => "SQRT",
            Function::Ln => "LN",
            Function::Not => "NOT",
            Function::Log => "LOG",
        };
        table.insert(lower, function);
        table.insert(upper, function);
    }
    table
});

/// Look up a function by its exact spelling.
pub fn function(spelling: &str) -> Option<Function> {
    FUNCTIONS.get(spelling).copied()
}
