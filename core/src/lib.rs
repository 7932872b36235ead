//! Core evaluation engine for the reckon expression language.
//!
//! Reckon evaluates arithmetic expressions given as text: numeric literals,
//! named variables, named functions, the binary operators `+ - * / \ ^`,
//! unary sign, a postfix percent operator, grouping and function calls.
//! The host program supplies variable bindings and function implementations
//! and calls [`api::Engine::evaluate`] one expression at a time.
//!
//! The engine is a hand-written recursive descent evaluator: expressions are
//! tokenized and computed in a single pass, with names resolved against a
//! [`symbols::SymbolTable`] as they are scanned. All transient allocations
//! made during one evaluation (argument vectors for function calls) come from
//! a bump arena that is released in bulk when the outermost call returns.
//!
//! Evaluation is single-threaded but re-entrant: a registered function may
//! call back into the evaluator on a sub-expression through its
//! [`evaluator::EvalContext`], sharing the outer call's arena.

pub mod api;
pub mod errors;
pub mod evaluator;
pub mod function;
pub mod stdlib;
pub mod symbols;
pub mod table;
