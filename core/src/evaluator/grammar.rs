//! Recursive descent over the expression grammar.
//!
//! Each grammar level is one method: it computes its left-hand side, pulls
//! one token to decide what to do, and either recurses for a right-hand side
//! or pushes the token back for an enclosing level. Values are computed on
//! the way down; nothing is built and revisited later.

use bumpalo::collections::Vec as BumpVec;

use crate::errors::EvalError;
use crate::evaluator::context::EvalContext;
use crate::evaluator::tokenizer::{Token, Tokenizer};
use crate::function::{Arity, Callable};

/// Argument vectors grow by this many slots at a time.
const ARG_BATCH: usize = 8;

pub(crate) fn evaluate(cx: &mut EvalContext<'_>, text: &str) -> Result<f64, EvalError> {
    let tokens = Tokenizer::new(text, cx.symbols());
    let mut parser = Parser { cx, tokens };
    // A trailing `)` or `,` at the top level is pushed back by `expr` and
    // then ignored; anything else unconsumed is a syntax error inside the
    // recursion itself.
    parser.expr()
}

struct Parser<'p, 'ev> {
    cx: &'p mut EvalContext<'ev>,
    tokens: Tokenizer<'p, 'ev>,
}

impl<'p, 'ev> Parser<'p, 'ev> {
    /// `expr := term [ ('+' | '-') expr ]`
    fn expr(&mut self) -> Result<f64, EvalError> {
        let lhs = self.term()?;
        match self.tokens.pull()? {
            Token::Plus => Ok(lhs + self.expr()?),
            Token::Minus => Ok(lhs - self.expr()?),
            Token::End => Ok(lhs),
            // Closes a group or separates arguments one level up.
            token @ (Token::RParen | Token::Comma) => {
                self.tokens.push(token);
                Ok(lhs)
            }
            _ => Err(EvalError::Syntax),
        }
    }

    /// `term := fact [ ('*' | '/' | '\') term ]`
    fn term(&mut self) -> Result<f64, EvalError> {
        let lhs = self.fact()?;
        match self.tokens.pull()? {
            Token::Star => Ok(lhs * self.term()?),
            Token::Slash => {
                let rhs = self.term()?;
                if rhs == 0.0 {
                    return Err(EvalError::DivideByZero);
                }
                Ok(lhs / rhs)
            }
            Token::Backslash => {
                let rhs = self.term()?;
                if rhs == 0.0 {
                    return Err(EvalError::DivideByZero);
                }
                Ok(lhs % rhs)
            }
            Token::End => Ok(lhs),
            token => {
                self.tokens.push(token);
                Ok(lhs)
            }
        }
    }

    /// `fact := item [ '^' fact ]`
    fn fact(&mut self) -> Result<f64, EvalError> {
        let lhs = self.item()?;
        match self.tokens.pull()? {
            Token::Caret => Ok(lhs.powf(self.fact()?)),
            Token::End => Ok(lhs),
            token => {
                self.tokens.push(token);
                Ok(lhs)
            }
        }
    }

    /// `item := [ '+' | '-' ] primary [ '%' ... ]`
    ///
    /// Unary sign applies to a whole factor, so `-2 ^ 2` is `-(2 ^ 2)`.
    /// A token that starts no item is pushed back and the item reads as
    /// zero, which is what makes an empty group `()` evaluate to zero.
    fn item(&mut self) -> Result<f64, EvalError> {
        let mut value = match self.tokens.pull()? {
            Token::Plus => self.fact()?,
            Token::Minus => -self.fact()?,
            Token::Number(v) | Token::Variable(v) => v,
            Token::Function { arity, callable } => self.call(arity, callable)?,
            Token::LParen => {
                let inner = self.expr()?;
                match self.tokens.pull()? {
                    Token::RParen => inner,
                    _ => return Err(EvalError::Syntax),
                }
            }
            token => {
                self.tokens.push(token);
                0.0
            }
        };

        loop {
            match self.tokens.pull()? {
                Token::Percent => value /= 100.0,
                Token::End => break,
                token => {
                    self.tokens.push(token);
                    break;
                }
            }
        }
        Ok(value)
    }

    /// A function call: `name '(' args ')'`, already past the name.
    fn call(&mut self, arity: Arity, callable: &'ev dyn Callable) -> Result<f64, EvalError> {
        if !matches!(self.tokens.pull()?, Token::LParen) {
            return Err(EvalError::Syntax);
        }

        let capacity = match arity {
            Arity::Exact(n) => n,
            Arity::Variadic => 0,
        };
        let mut args = BumpVec::with_capacity_in(capacity, self.cx.arena());
        self.args(&mut args)?;

        // The count is checked before the closing parenthesis is consumed.
        match arity {
            Arity::Exact(n) if args.len() != n => return Err(EvalError::ArgumentCount),
            Arity::Variadic if args.is_empty() => return Err(EvalError::ArgumentCount),
            _ => {}
        }

        if !matches!(self.tokens.pull()?, Token::RParen) {
            return Err(EvalError::Syntax);
        }

        callable
            .call(self.cx, &mut args)
            .map_err(|_| EvalError::Function)
    }

    /// Collect comma-separated argument expressions, leaving the closing
    /// `)` pushed back for the caller.
    fn args(&mut self, out: &mut BumpVec<'ev, f64>) -> Result<(), EvalError> {
        let peek = self.tokens.pull()?;
        self.tokens.push(peek);
        if matches!(peek, Token::RParen) {
            return Ok(());
        }

        let value = self.expr()?;
        if out.len() == out.capacity() {
            out.reserve_exact(ARG_BATCH);
        }
        out.push(value);

        match self.tokens.pull()? {
            Token::Comma => self.args(out),
            token @ Token::RParen => {
                self.tokens.push(token);
                Ok(())
            }
            _ => Err(EvalError::Syntax),
        }
    }
}
