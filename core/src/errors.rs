//! The evaluation error taxonomy.
//!
//! One evaluation produces at most one error: the first failure unwinds the
//! grammar recursion with its cause intact, and no partial result is
//! returned. Tokenizer-time errors (bad literal, unknown name, syntax) and
//! evaluator-time errors (divide by zero, argument count, function
//! evaluation) travel the same path.
//!
//! Every variant carries a stable numeric code for hosts that report errors
//! by number; [`error_message`] maps any code back to a human-readable
//! string.

use thiserror::Error;

/// An error produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Unrecognized character, or a token where the grammar forbids it.
    #[error("syntax error")]
    Syntax,

    /// `/` or `\` with a right-hand operand of exactly zero.
    #[error("divide by zero")]
    DivideByZero,

    /// Identifier not present in the symbol table at tokenize time.
    #[error("unknown name `{0}`")]
    UnknownName(String),

    /// Numeric literal exceeds the maximum literal length.
    #[error("bad literal value")]
    BadLiteral,

    /// Allocator exhaustion. Kept for hosts that consume numeric codes;
    /// Rust's global allocator aborts instead of reporting failure, so no
    /// code path raises this.
    #[error("error allocating memory")]
    Memory,

    /// Reserved code, raised by no code path.
    #[error("integer convert error")]
    IntegerConvert,

    /// Reserved code: the grammar reports a missing `)` as a syntax error.
    #[error("missing close parenthesis")]
    MissingParen,

    /// `evaluate` called with empty input text.
    #[error("null expression")]
    NullExpression,

    /// A registered function signaled failure.
    #[error("error in function evaluation")]
    Function,

    /// Call-site argument count does not satisfy the declared arity.
    #[error("invalid argument count")]
    ArgumentCount,
}

impl EvalError {
    /// The stable numeric code for this error.
    pub fn code(&self) -> i32 {
        match self {
            EvalError::Syntax => 1,
            EvalError::DivideByZero => 2,
            EvalError::UnknownName(_) => 3,
            EvalError::BadLiteral => 4,
            EvalError::Memory => 5,
            EvalError::IntegerConvert => 6,
            EvalError::MissingParen => 7,
            EvalError::NullExpression => 8,
            EvalError::Function => 9,
            EvalError::ArgumentCount => 10,
        }
    }
}

/// Human-readable description of a numeric error code.
///
/// Covers every code an evaluation can produce, code `0` ("no error"), and
/// falls back to a fixed string for out-of-range values.
pub fn error_message(code: i32) -> &'static str {
    match code {
        0 => "No Error",
        1 => "Syntax Error",
        2 => "Divide By Zero",
        3 => "Unknown Name",
        4 => "Bad Literal Value",
        5 => "Error Allocating Memory",
        6 => "Integer Convert Error",
        7 => "Missing Close Parentheses",
        8 => "NULL Expression String",
        9 => "Error in Function Evaluation",
        10 => "Invalid Argument Count",
        _ => "Unknown Error Value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_a_message() {
        for code in 0..=10 {
            assert_ne!(error_message(code), "Unknown Error Value");
        }
    }

    #[test]
    fn test_out_of_range_codes_fall_back() {
        assert_eq!(error_message(-1), "Unknown Error Value");
        assert_eq!(error_message(11), "Unknown Error Value");
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(EvalError::Syntax.code(), 1);
        assert_eq!(EvalError::DivideByZero.code(), 2);
        assert_eq!(EvalError::UnknownName("x".into()).code(), 3);
        assert_eq!(EvalError::ArgumentCount.code(), 10);
    }
}
