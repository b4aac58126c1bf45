use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use tern_value::Value;

/// Name bindings with an optional enclosing scope.
#[derive(Default)]
pub struct Scope {
    parent: Option<Rc<Scope>>,
    bindings: RefCell<HashMap<String, Value>>,
}

impl Scope {
    /// Creates a root scope.
    pub fn new() -> Rc<Scope> {
        Self::with_parent(None)
    }

    pub fn with_parent(parent: Option<Rc<Scope>>) -> Rc<Scope> {
        Rc::new(Scope {
            parent,
            bindings: RefCell::new(HashMap::new()),
        })
    }

    /// Looks `name` up, walking outward through the enclosing scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.borrow().get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|p| p.get(name)),
        }
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn set(&self, name: &str, value: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// Returns `true` if `name` is bound in this scope itself.
    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Rebinds `name` in the nearest scope that binds it, or in this scope if none does.
    pub fn assign(&self, name: &str, value: Value) {
        if let Err(value) = self.reset(name, value) {
            self.set(name, value);
        }
    }

    /// Rebinds an existing binding. Hands `value` back if `name` is unbound.
    fn reset(&self, name: &str, value: Value) -> Result<(), Value> {
        if let Entry::Occupied(mut entry) = self.bindings.borrow_mut().entry(name.to_string()) {
            entry.insert(value);
            return Ok(());
        }
        match self.parent.as_ref() {
            Some(parent) => parent.reset(name, value),
            None => Err(value),
        }
    }
}
