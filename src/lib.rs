//! Reckon - an embeddable arithmetic expression evaluator
//!
//! # Overview
//!
//! Reckon evaluates arithmetic expressions supplied as text against
//! host-provided variables and functions. Common use cases include:
//!
//! - Calculator front ends
//! - User-editable formula fields in configuration
//! - Spreadsheet-style derived values
//!
//! Expressions support the binary operators `+ - * / \ ^` (`\` is floating
//! modulo, `^` is power), unary sign, a postfix `%` percent operator,
//! parenthesized grouping and named function calls. Operators of one
//! precedence level associate to the right.
//!
//! # Quick Start
//!
//! ```
//! use reckon::Engine;
//!
//! let mut engine = Engine::with_default_env();
//! engine.set_variable("x", 2.0)?;
//!
//! assert_eq!(engine.evaluate("2 + 3 * x"), Ok(8.0));
//! assert_eq!(engine.evaluate("sqrt(x ^ 4)"), Ok(4.0));
//! # Ok::<(), reckon::DefineError>(())
//! ```
//!
//! # Host functions
//!
//! Register native Rust functions with [`Engine::define_function`]; any
//! closure over the right signature works, and the [`Callable`] trait covers
//! functions that carry state or re-enter the evaluator:
//!
//! ```
//! use reckon::{Arity, Callable, Engine, EvalContext, FunctionError};
//!
//! struct Formula(String);
//!
//! impl Callable for Formula {
//!     fn call(&self, cx: &mut EvalContext<'_>, _args: &mut [f64]) -> Result<f64, FunctionError> {
//!         Ok(cx.evaluate(&self.0)?)
//!     }
//! }
//!
//! let mut engine = Engine::with_default_env();
//! engine.set_variable("base", 100.0)?;
//! engine.define_function("markup", Arity::Exact(0), Formula("base * 1.2".into()))?;
//!
//! assert_eq!(engine.evaluate("markup() + 5"), Ok(125.0));
//! # Ok::<(), reckon::DefineError>(())
//! ```

// Re-export public API from reckon_core
pub use reckon_core::api::Engine;

// Re-export the binding and function surface
pub use reckon_core::function::{Arity, Callable, FunctionError};
pub use reckon_core::symbols::{Binding, DefineError, SymbolTable, VarError};

// Re-export the evaluation context and errors
pub use reckon_core::errors::{EvalError, error_message};
pub use reckon_core::evaluator::EvalContext;
