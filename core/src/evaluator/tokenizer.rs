//! Character scanning and name resolution.

use tracing::trace;

use crate::errors::EvalError;
use crate::function::{Arity, Callable};
use crate::symbols::{Binding, SymbolTable};

/// Longest accepted numeric literal, in bytes.
pub(crate) const MAX_LITERAL_LEN: usize = 100;

/// One scanned token.
///
/// Names are resolved during scanning: an identifier becomes either the
/// current value of a variable or a reference to a function binding, never a
/// bare name.
#[derive(Clone, Copy)]
pub(crate) enum Token<'ev> {
    /// End of input.
    End,
    Plus,
    Minus,
    Star,
    Slash,
    Backslash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
    Number(f64),
    Variable(f64),
    Function {
        arity: Arity,
        callable: &'ev dyn Callable,
    },
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::End => write!(f, "End"),
            Token::Plus => write!(f, "Plus"),
            Token::Minus => write!(f, "Minus"),
            Token::Star => write!(f, "Star"),
            Token::Slash => write!(f, "Slash"),
            Token::Backslash => write!(f, "Backslash"),
            Token::Percent => write!(f, "Percent"),
            Token::Caret => write!(f, "Caret"),
            Token::LParen => write!(f, "LParen"),
            Token::RParen => write!(f, "RParen"),
            Token::Comma => write!(f, "Comma"),
            Token::Number(v) => write!(f, "Number({v})"),
            Token::Variable(v) => write!(f, "Variable({v})"),
            Token::Function { arity, .. } => write!(f, "Function({arity:?})"),
        }
    }
}

/// Scanner over one expression's text with a one-token pushback slot.
pub(crate) struct Tokenizer<'t, 'ev> {
    text: &'t [u8],
    pos: usize,
    pushback: Option<Token<'ev>>,
    symbols: &'ev SymbolTable,
}

impl<'t, 'ev> Tokenizer<'t, 'ev> {
    pub(crate) fn new(text: &'t str, symbols: &'ev SymbolTable) -> Self {
        Self {
            text: text.as_bytes(),
            pos: 0,
            pushback: None,
            symbols,
        }
    }

    /// Return a token to the scanner. The next [`pull`](Self::pull) yields
    /// it again. Only one token fits; the grammar never needs more.
    pub(crate) fn push(&mut self, token: Token<'ev>) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(token);
    }

    /// Scan the next token.
    pub(crate) fn pull(&mut self) -> Result<Token<'ev>, EvalError> {
        if let Some(token) = self.pushback.take() {
            trace!(?token, "pull (pushed back)");
            return Ok(token);
        }

        while self.pos < self.text.len() && self.text[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }

        let Some(&byte) = self.text.get(self.pos) else {
            return Ok(Token::End);
        };

        let token = match byte {
            b'+' => self.single(Token::Plus),
            b'-' => self.single(Token::Minus),
            b'*' => self.single(Token::Star),
            b'/' => self.single(Token::Slash),
            b'\\' => self.single(Token::Backslash),
            b'%' => self.single(Token::Percent),
            b'^' => self.single(Token::Caret),
            b'(' => self.single(Token::LParen),
            b')' => self.single(Token::RParen),
            b',' => self.single(Token::Comma),
            b'0'..=b'9' | b'.' => self.scan_number()?,
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.scan_name()?,
            _ => return Err(EvalError::Syntax),
        };
        trace!(?token, pos = self.pos, "pull");
        Ok(token)
    }

    fn single(&mut self, token: Token<'ev>) -> Token<'ev> {
        self.pos += 1;
        token
    }

    /// Scan digits with at most the leading part of one decimal point.
    /// `strtod`-style parsing: a lone `.` scans as the literal zero.
    fn scan_number(&mut self) -> Result<Token<'ev>, EvalError> {
        let start = self.pos;
        while self
            .text
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit())
        {
            self.pos += 1;
        }
        if self.text.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            while self
                .text
                .get(self.pos)
                .is_some_and(|b| b.is_ascii_digit())
            {
                self.pos += 1;
            }
        }

        let literal = &self.text[start..self.pos];
        if literal.len() >= MAX_LITERAL_LEN {
            return Err(EvalError::BadLiteral);
        }
        // The scan admits only ASCII digits and dots, so this is valid UTF-8
        // and parses except for the bare-dot case.
        let literal = std::str::from_utf8(literal).map_err(|_| EvalError::BadLiteral)?;
        Ok(Token::Number(literal.parse().unwrap_or(0.0)))
    }

    /// Scan an identifier and resolve it against the symbol table.
    fn scan_name(&mut self) -> Result<Token<'ev>, EvalError> {
        let start = self.pos;
        while self
            .text
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            self.pos += 1;
        }

        // Only ASCII bytes were admitted.
        let name = std::str::from_utf8(&self.text[start..self.pos])
            .map_err(|_| EvalError::Syntax)?;
        match self.symbols.lookup(name) {
            Some(Binding::Variable(value)) => Ok(Token::Variable(*value)),
            Some(Binding::Function(binding)) => Ok(Token::Function {
                arity: binding.arity,
                callable: binding.callable.as_ref(),
            }),
            None => Err(EvalError::UnknownName(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EvalContext;
    use crate::function::{Arity, FunctionError};

    fn zero(_cx: &mut EvalContext<'_>, _args: &mut [f64]) -> Result<f64, FunctionError> {
        Ok(0.0)
    }

    fn pull_all(text: &str, symbols: &SymbolTable) -> Vec<String> {
        let mut tokens = Tokenizer::new(text, symbols);
        let mut out = Vec::new();
        loop {
            let token = tokens.pull().unwrap();
            out.push(format!("{token:?}"));
            if matches!(token, Token::End) {
                return out;
            }
        }
    }

    #[test]
    fn test_operators_and_whitespace() {
        let symbols = SymbolTable::new();
        assert_eq!(
            pull_all(" + -* / \\ % ^ ( ) , ", &symbols),
            [
                "Plus",
                "Minus",
                "Star",
                "Slash",
                "Backslash",
                "Percent",
                "Caret",
                "LParen",
                "RParen",
                "Comma",
                "End"
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let symbols = SymbolTable::new();
        assert_eq!(
            pull_all("1 2.5 .5 10.", &symbols),
            ["Number(1)", "Number(2.5)", "Number(0.5)", "Number(10)", "End"]
        );
    }

    #[test]
    fn test_bare_dot_scans_as_zero() {
        let symbols = SymbolTable::new();
        assert_eq!(pull_all(".", &symbols), ["Number(0)", "End"]);
    }

    #[test]
    fn test_second_dot_starts_a_new_token() {
        let symbols = SymbolTable::new();
        assert_eq!(
            pull_all("1.2.3", &symbols),
            ["Number(1.2)", "Number(0.3)", "End"]
        );
    }

    #[test]
    fn test_literal_length_cap() {
        let symbols = SymbolTable::new();
        let ok = "9".repeat(MAX_LITERAL_LEN - 1);
        let mut tokens = Tokenizer::new(&ok, &symbols);
        assert!(matches!(tokens.pull(), Ok(Token::Number(_))));

        let long = "9".repeat(MAX_LITERAL_LEN);
        let mut tokens = Tokenizer::new(&long, &symbols);
        assert_eq!(tokens.pull().unwrap_err(), EvalError::BadLiteral);
    }

    #[test]
    fn test_name_resolution() {
        let mut symbols = SymbolTable::new();
        symbols.set_variable("x", 4.5).unwrap();
        symbols.set_variable("_under_score2", 1.0).unwrap();
        symbols
            .define_function("f", Arity::Exact(1), Box::new(zero))
            .unwrap();
        assert_eq!(
            pull_all("x _under_score2", &symbols),
            ["Variable(4.5)", "Variable(1)", "End"]
        );

        let mut tokens = Tokenizer::new("f", &symbols);
        assert!(matches!(tokens.pull(), Ok(Token::Function { .. })));
    }

    #[test]
    fn test_unknown_name() {
        let symbols = SymbolTable::new();
        let mut tokens = Tokenizer::new("nope", &symbols);
        assert_eq!(
            tokens.pull().unwrap_err(),
            EvalError::UnknownName("nope".to_string())
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let symbols = SymbolTable::new();
        let mut tokens = Tokenizer::new("@", &symbols);
        assert_eq!(tokens.pull().unwrap_err(), EvalError::Syntax);
    }

    #[test]
    fn test_pushback_single_slot() {
        let symbols = SymbolTable::new();
        let mut tokens = Tokenizer::new("1 2", &symbols);
        let first = tokens.pull().unwrap();
        tokens.push(first);
        assert!(matches!(tokens.pull(), Ok(Token::Number(v)) if v == 1.0));
        assert!(matches!(tokens.pull(), Ok(Token::Number(v)) if v == 2.0));
        assert!(matches!(tokens.pull(), Ok(Token::End)));
    }
}
