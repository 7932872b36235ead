//! The engine: a symbol table plus the entry point for evaluation.

use bumpalo::Bump;
use tracing::debug;

use crate::errors::EvalError;
use crate::evaluator::EvalContext;
use crate::function::{Arity, Callable};
use crate::stdlib;
use crate::symbols::{Binding, DefineError, SymbolTable, VarError};

/// An expression evaluation engine.
///
/// Owns the symbol table; each [`evaluate`](Self::evaluate) call borrows it
/// together with a fresh arena, runs one expression, and releases the arena
/// in bulk on return. Bindings persist across evaluations, so a host sets
/// variables once and evaluates many expressions against them.
///
/// ```
/// use reckon_core::api::Engine;
///
/// let mut engine = Engine::with_default_env();
/// engine.set_variable("x", 2.0)?;
/// assert_eq!(engine.evaluate("2 + 3 * x"), Ok(8.0));
/// # Ok::<(), reckon_core::symbols::DefineError>(())
/// ```
pub struct Engine {
    symbols: SymbolTable,
    defaults_installed: bool,
}

impl Engine {
    /// An engine with no bindings at all, not even the built-in functions.
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            defaults_installed: false,
        }
    }

    /// An engine with the built-in function library installed.
    pub fn with_default_env() -> Self {
        let mut engine = Self::new();
        // A fresh table has no conflicting names.
        match engine.install_default_env() {
            Ok(()) => engine,
            Err(err) => unreachable!("default env conflicts with empty table: {err}"),
        }
    }

    /// Install the built-in function library. Idempotent.
    pub fn install_default_env(&mut self) -> Result<(), DefineError> {
        if self.defaults_installed {
            return Ok(());
        }
        stdlib::install(&mut self.symbols)?;
        self.defaults_installed = true;
        debug!(bindings = self.symbols.len(), "default env installed");
        Ok(())
    }

    /// Evaluate one expression against the current bindings.
    pub fn evaluate(&self, text: &str) -> Result<f64, EvalError> {
        let arena = Bump::new();
        EvalContext::new(&self.symbols, &arena).evaluate(text)
    }

    /// Bind or update a variable.
    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<(), DefineError> {
        self.symbols.set_variable(name, value)
    }

    /// Read a variable's current value.
    pub fn get_variable(&self, name: &str) -> Result<f64, VarError> {
        self.symbols.get_variable(name)
    }

    /// Register a function under `name`.
    pub fn define_function(
        &mut self,
        name: &str,
        arity: Arity,
        callable: impl Callable + 'static,
    ) -> Result<(), DefineError> {
        self.symbols.define_function(name, arity, Box::new(callable))
    }

    /// Drop a binding of either kind. Returns whether the name was bound.
    pub fn remove(&mut self, name: &str) -> bool {
        self.symbols.remove(name)
    }

    /// Visit every bound variable. Functions are skipped.
    pub fn for_each_variable(&self, mut visit: impl FnMut(&str, f64)) {
        let _ = self.symbols.for_each(|name, binding| {
            if let Binding::Variable(value) = binding {
                visit(name, *value);
            }
            std::ops::ControlFlow::<()>::Continue(())
        });
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::evaluator::EvalContext;
    use crate::function::FunctionError;

    #[test]
    fn test_bare_engine_has_no_builtins() {
        let engine = Engine::new();
        assert_eq!(
            engine.evaluate("sin(0)"),
            Err(EvalError::UnknownName("sin".to_string()))
        );
    }

    #[test]
    fn test_variables_persist_across_evaluations() {
        let mut engine = Engine::new();
        engine.set_variable("rate", 0.25).unwrap();
        assert_eq!(engine.evaluate("rate * 100"), Ok(25.0));
        engine.set_variable("rate", 0.5).unwrap();
        assert_eq!(engine.evaluate("rate * 100"), Ok(50.0));
    }

    #[test]
    fn test_install_default_env_is_idempotent() {
        let mut engine = Engine::new();
        engine.install_default_env().unwrap();
        engine.install_default_env().unwrap();
        assert_eq!(engine.evaluate("sqrt(4)"), Ok(2.0));
    }

    #[test]
    fn test_host_function_registration() {
        let mut engine = Engine::new();
        engine
            .define_function(
                "double",
                Arity::Exact(1),
                |_cx: &mut EvalContext<'_>, args: &mut [f64]| -> Result<f64, FunctionError> {
                    Ok(args[0] * 2.0)
                },
            )
            .unwrap();
        assert_eq!(engine.evaluate("double(21)"), Ok(42.0));
    }

    #[test]
    fn test_for_each_variable_skips_functions() {
        let mut engine = Engine::with_default_env();
        engine.set_variable("a", 1.0).unwrap();
        engine.set_variable("b", 2.0).unwrap();
        let mut seen = Vec::new();
        engine.for_each_variable(|name, value| seen.push((name.to_string(), value)));
        seen.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(seen, [("a".to_string(), 1.0), ("b".to_string(), 2.0)]);
    }

    #[test]
    fn test_remove_unbinds() {
        let mut engine = Engine::new();
        engine.set_variable("x", 1.0).unwrap();
        assert!(engine.remove("x"));
        assert_eq!(
            engine.evaluate("x"),
            Err(EvalError::UnknownName("x".to_string()))
        );
    }
}
