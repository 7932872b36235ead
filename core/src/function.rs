//! The callable contract for registered functions.

use crate::errors::EvalError;
use crate::evaluator::EvalContext;
use thiserror::Error;

/// Declared argument count for a function binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments, minimum one.
    Variadic,
}

/// Failure signal from a registered function.
///
/// Carries no detail by design: the evaluator surfaces any callable failure
/// to the host as a single "error in function evaluation".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("function evaluation failed")]
pub struct FunctionError;

/// A nested evaluation failing inside a callable is a callable failure.
impl From<EvalError> for FunctionError {
    fn from(_: EvalError) -> Self {
        FunctionError
    }
}

/// A function registered in the symbol table.
///
/// The callable receives the evaluation context and a freshly built argument
/// slice; the slice may be reordered in place (the aggregate built-ins sort
/// their arguments). The context allows a function to evaluate a
/// sub-expression of its own via [`EvalContext::evaluate`], nesting inside
/// the current evaluation and sharing its arena.
///
/// Any `Fn` closure or `fn` item with the matching signature is a
/// `Callable`; implement the trait directly when the function needs owned
/// state:
///
/// ```
/// use reckon_core::evaluator::EvalContext;
/// use reckon_core::function::{Callable, FunctionError};
///
/// struct Formula(String);
///
/// impl Callable for Formula {
///     fn call(&self, cx: &mut EvalContext<'_>, _args: &mut [f64]) -> Result<f64, FunctionError> {
///         Ok(cx.evaluate(&self.0)?)
///     }
/// }
/// ```
pub trait Callable {
    fn call(&self, cx: &mut EvalContext<'_>, args: &mut [f64]) -> Result<f64, FunctionError>;
}

impl<F> Callable for F
where
    F: Fn(&mut EvalContext<'_>, &mut [f64]) -> Result<f64, FunctionError>,
{
    fn call(&self, cx: &mut EvalContext<'_>, args: &mut [f64]) -> Result<f64, FunctionError> {
        self(cx, args)
    }
}
