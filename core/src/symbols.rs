//! The symbol table: named variables and functions.
//!
//! Variables and functions share one namespace. A name is bound to exactly
//! one kind at a time, and rebinding across kinds is refused rather than
//! silently replacing; within a kind, assigning a variable updates its value
//! and defining a function replaces its implementation.
//!
//! Names are resolved at tokenize time, so every identifier in an expression
//! must already be bound when the expression is evaluated.

use core::fmt;
use core::ops::ControlFlow;

use thiserror::Error;

use crate::function::{Arity, Callable};
use crate::table::HashTable;

/// Slot count for the symbol table. Fixed for the table's lifetime.
const SLOT_COUNT: usize = 500;

/// Positional shift hash over the leading bytes of the name.
///
/// Cheap and good enough for identifier-shaped keys; only the first 32
/// bytes participate, so very long names hash by prefix.
fn name_hash(key: &[u8]) -> u32 {
    key.iter()
        .take(32)
        .enumerate()
        .fold(0u32, |h, (i, &b)| h.wrapping_add((b as u32) << i))
}

/// A function binding: declared arity plus the implementation.
pub struct FnBinding {
    pub arity: Arity,
    pub callable: Box<dyn Callable>,
}

impl fmt::Debug for FnBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBinding")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// What a name is bound to.
#[derive(Debug)]
pub enum Binding {
    Variable(f64),
    Function(FnBinding),
}

/// Error defining or replacing a binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefineError {
    #[error("`{0}` is bound to a function, not a variable")]
    NameIsFunction(String),
    #[error("`{0}` is bound to a variable, not a function")]
    NameIsVariable(String),
}

/// Error reading a variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarError {
    #[error("`{0}` is not bound")]
    NotFound(String),
    #[error("`{0}` is bound to a function, not a variable")]
    IsFunction(String),
}

/// Table of name bindings shared by every evaluation on an engine.
pub struct SymbolTable {
    table: HashTable<Binding>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            table: HashTable::new(SLOT_COUNT, name_hash),
        }
    }

    /// Number of bound names, variables and functions together.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Look up a name without caring what kind it is bound to.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.table.get(name)
    }

    /// Bind a variable, updating the value in place if `name` is already a
    /// variable. Refuses to shadow a function.
    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<(), DefineError> {
        match self.table.get_mut(name) {
            Some(Binding::Variable(slot)) => {
                *slot = value;
                Ok(())
            }
            Some(Binding::Function(_)) => Err(DefineError::NameIsFunction(name.to_string())),
            None => {
                self.table.insert(name, Binding::Variable(value));
                Ok(())
            }
        }
    }

    /// Read a variable's current value.
    pub fn get_variable(&self, name: &str) -> Result<f64, VarError> {
        match self.table.get(name) {
            Some(Binding::Variable(value)) => Ok(*value),
            Some(Binding::Function(_)) => Err(VarError::IsFunction(name.to_string())),
            None => Err(VarError::NotFound(name.to_string())),
        }
    }

    /// Bind a function, replacing the implementation if `name` is already a
    /// function. Refuses to shadow a variable.
    pub fn define_function(
        &mut self,
        name: &str,
        arity: Arity,
        callable: Box<dyn Callable>,
    ) -> Result<(), DefineError> {
        match self.table.get_mut(name) {
            Some(Binding::Function(binding)) => {
                binding.arity = arity;
                binding.callable = callable;
                Ok(())
            }
            Some(Binding::Variable(_)) => Err(DefineError::NameIsVariable(name.to_string())),
            None => {
                self.table
                    .insert(name, Binding::Function(FnBinding { arity, callable }));
                Ok(())
            }
        }
    }

    /// Drop a binding of either kind. Returns whether the name was bound.
    pub fn remove(&mut self, name: &str) -> bool {
        self.table.remove(name).is_some()
    }

    /// Visit every binding in unspecified order.
    pub fn for_each<B>(
        &self,
        visit: impl FnMut(&str, &Binding) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        self.table.for_each(visit)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("len", &self.table.len())
            .finish_non_exhaustive()
    }
}
