use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::{BuiltinError, Result};
use crate::value::Term;

/// Result continuation handed to a builtin. Called at most once per call.
pub type Iter<'a> = dyn FnMut(Term) -> Result<()> + 'a;

/// Native implementation of a builtin. Operand count is checked by the
/// registry before this is called.
pub type BuiltinFn = fn(&[Term], &mut Iter<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Name → builtin table the host dispatches through.
pub struct BuiltinRegistry {
    builtins: HashMap<&'static str, Builtin>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            builtins: HashMap::new(),
        }
    }

    /// Register a builtin. Returns error if name already registered.
    pub fn register(&mut self, builtin: Builtin) -> Result<()> {
        if self.builtins.contains_key(builtin.name) {
            warn!(name = builtin.name, "duplicate builtin registration");
            return Err(BuiltinError::DuplicateName(builtin.name.to_string()));
        }
        self.builtins.insert(builtin.name, builtin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.builtins.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }

    /// Dispatch `name` with `operands`, delivering the result to `iter`.
    pub fn call(&self, name: &str, operands: &[Term], iter: &mut Iter<'_>) -> Result<()> {
        let builtin = self
            .get(name)
            .ok_or_else(|| BuiltinError::UnknownBuiltin(name.to_string()))?;
        if operands.len() != builtin.arity {
            return Err(BuiltinError::Arity {
                name: name.to_string(),
                expected: builtin.arity,
                actual: operands.len(),
            });
        }
        debug!(builtin = name, operands = operands.len(), "dispatching builtin");
        (builtin.func)(operands, iter)
    }

    /// Call `name` and return the single result it produces.
    pub fn eval(&self, name: &str, operands: &[Term]) -> Result<Term> {
        let mut result = None;
        self.call(name, operands, &mut |term| {
            result = Some(term);
            Ok(())
        })?;
        result.ok_or_else(|| BuiltinError::NoResult(name.to_string()))
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}
