//! Variable environments
//!
//! An [`Environment`] is one scope of bindings plus an optional parent. Scopes
//! are shared through [`EnvRef`] so a closure can hold on to the scope it was
//! created in while the evaluator keeps assigning into it.
//!
//! A closure stored in the scope it captures forms an `Rc` cycle; such scopes
//! live as long as the interpreter that owns them.

use crate::value::Value;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scope whose lookups fall through to `parent`
    pub fn child(parent: EnvRef) -> Self {
        Environment {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Innermost binding of `name`
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .parent
                .as_ref()
                .and_then(|parent| parent.borrow().get(name)),
        }
    }

    /// Bind `name` in this scope, replacing any earlier binding here
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.borrow().contains(name))
    }

    /// Detached copy of every visible binding, inner scopes shadowing outer
    pub fn flatten(&self) -> Environment {
        let mut flat = match &self.parent {
            Some(parent) => parent.borrow().flatten(),
            None => Environment::new(),
        };
        for (name, value) in &self.bindings {
            flat.bindings.insert(name.clone(), value.clone());
        }
        flat
    }
}
