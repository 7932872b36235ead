//! The built-in function library.
//!
//! Rounding, trigonometry, logarithms, a pseudo-random source and a family
//! of variadic aggregates. Installation is explicit: a bare engine has no
//! built-ins until [`install`] registers them.

mod math;

use crate::function::Arity;
use crate::symbols::{DefineError, SymbolTable};

/// Signature shared by every built-in.
pub(crate) type StdFn = fn(
    &mut crate::evaluator::EvalContext<'_>,
    &mut [f64],
) -> Result<f64, crate::function::FunctionError>;

const EXACT_1: Arity = Arity::Exact(1);

/// Name, arity and implementation of every built-in.
pub(crate) const FUNCTIONS: &[(&str, Arity, StdFn)] = &[
    ("abs", EXACT_1, math::abs),
    ("int", EXACT_1, math::int),
    ("round", EXACT_1, math::round),
    ("trunc", EXACT_1, math::trunc),
    ("floor", EXACT_1, math::floor),
    ("ceil", EXACT_1, math::ceil),
    ("sign", EXACT_1, math::sign),
    ("sin", EXACT_1, math::sin),
    ("cos", EXACT_1, math::cos),
    ("tan", EXACT_1, math::tan),
    ("asin", EXACT_1, math::asin),
    ("acos", EXACT_1, math::acos),
    ("atan", EXACT_1, math::atan),
    ("sinh", EXACT_1, math::sinh),
    ("cosh", EXACT_1, math::cosh),
    ("tanh", EXACT_1, math::tanh),
    ("asinh", EXACT_1, math::asinh),
    ("acosh", EXACT_1, math::acosh),
    ("atanh", EXACT_1, math::atanh),
    ("ln", EXACT_1, math::ln),
    ("log", EXACT_1, math::log),
    ("exp", EXACT_1, math::exp),
    ("sqrt", EXACT_1, math::sqrt),
    ("deg", EXACT_1, math::deg),
    ("rad", EXACT_1, math::rad),
    ("fact", EXACT_1, math::fact),
    ("rand", Arity::Exact(0), math::rand),
    ("sum", Arity::Variadic, math::sum),
    ("min", Arity::Variadic, math::min),
    ("max", Arity::Variadic, math::max),
    ("avg", Arity::Variadic, math::avg),
    ("med", Arity::Variadic, math::med),
    ("var", Arity::Variadic, math::var),
    ("std", Arity::Variadic, math::std),
];

/// Register every built-in function in `symbols`.
///
/// Re-installing over an earlier install replaces the bindings and
/// succeeds; the only failure is a built-in name already taken by a host
/// variable.
pub fn install(symbols: &mut SymbolTable) -> Result<(), DefineError> {
    for &(name, arity, f) in FUNCTIONS {
        symbols.define_function(name, arity, Box::new(f))?;
    }
    Ok(())
}
