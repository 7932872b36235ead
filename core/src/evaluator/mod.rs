//! The expression evaluator.
//!
//! A single pass over the text: the tokenizer scans characters into tokens,
//! resolving names against the symbol table as it goes, and the grammar
//! computes values directly while descending, with no intermediate tree.
//!
//! The grammar, highest recursion first:
//!
//! ```text
//! expr  :=  term   [ ('+' | '-') expr ]
//! term  :=  fact   [ ('*' | '/' | '\') term ]
//! fact  :=  item   [ '^' fact ]
//! item  :=  [ '+' | '-' ] primary  [ '%' ... ]
//! ```
//!
//! Binary operators at one level associate to the right, so `2 - 3 - 4` is
//! `2 - (3 - 4)` and `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`. Unary minus binds a whole
//! factor, so `-2 ^ 2` is `-(2 ^ 2)`. Postfix `%` divides by one hundred and
//! may be repeated.

mod grammar;
mod tokenizer;

pub mod context;

pub use context::EvalContext;
