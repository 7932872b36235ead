//! Per-evaluation state shared down the recursion.

use bumpalo::Bump;
use tracing::trace;

use crate::errors::EvalError;
use crate::evaluator::grammar;
use crate::symbols::SymbolTable;

/// State for one evaluation, threaded through the grammar.
///
/// A context borrows the symbol table and an arena for the duration of one
/// outermost [`evaluate`](Self::evaluate) call. Registered functions receive
/// the context and may evaluate sub-expressions through it; such nested
/// evaluations share the outer call's arena and show up in
/// [`depth`](Self::depth).
pub struct EvalContext<'ev> {
    symbols: &'ev SymbolTable,
    arena: &'ev Bump,
    depth: usize,
}

impl<'ev> EvalContext<'ev> {
    pub fn new(symbols: &'ev SymbolTable, arena: &'ev Bump) -> Self {
        Self {
            symbols,
            arena,
            depth: 0,
        }
    }

    /// Evaluate one expression to a value.
    ///
    /// Input that is empty or entirely whitespace is rejected as
    /// [`EvalError::NullExpression`] before any scanning happens.
    pub fn evaluate(&mut self, text: &str) -> Result<f64, EvalError> {
        if text.trim_ascii().is_empty() {
            return Err(EvalError::NullExpression);
        }

        trace!(depth = self.depth, text, "evaluate");
        self.depth += 1;
        let result = grammar::evaluate(self, text);
        self.depth -= 1;
        trace!(depth = self.depth, ?result, "evaluate done");
        result
    }

    pub fn symbols(&self) -> &'ev SymbolTable {
        self.symbols
    }

    pub fn arena(&self) -> &'ev Bump {
        self.arena
    }

    /// How many evaluations are on the stack, counting this one.
    ///
    /// `1` inside a plain evaluation; higher inside a function that called
    /// back into the evaluator.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
