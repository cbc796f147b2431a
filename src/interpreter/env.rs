use std::cell::RefCell;
use std::rc::Rc;

use super::value::Value;

/// Shared handle to an environment in a parent chain.
pub type EnvRef = Rc<RefCell<Env>>;

/// A lexically-chained symbol table mapping names to values.
///
/// Entries keep insertion order so the `env` builtin can list them the way
/// they were defined. Cloning an environment deep-copies its own entries
/// but shares the parent reference.
#[derive(Debug, Clone, Default)]
pub struct Env {
    entries: Vec<(String, Value)>,
    parent: Option<EnvRef>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            parent: None,
        }
    }

    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Resolve a name, searching local bindings first and then the parent
    /// chain. Returns a copy of the stored value; at the root with no match,
    /// an error value.
    pub fn lookup(&self, name: &str) -> Value {
        for (key, value) in &self.entries {
            if key == name {
                return value.clone();
            }
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => Value::Error(format!("Unbound symbol '{name}'")),
        }
    }

    /// Bind a name in this environment's own table, overwriting in place if
    /// it already exists.
    pub fn bind_local(&mut self, name: &str, value: Value) {
        for entry in &mut self.entries {
            if entry.0 == name {
                entry.1 = value;
                return;
            }
        }
        self.entries.push((name.to_string(), value));
    }

    pub fn set_parent(&mut self, parent: EnvRef) {
        self.parent = Some(parent);
    }

    /// The bound names in insertion order, for diagnostic listing.
    pub fn list_names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }
}

/// Bind a name in the root environment of the chain `env` belongs to.
pub fn bind_global(env: &EnvRef, name: &str, value: Value) {
    let mut current = Rc::clone(env);
    loop {
        let parent = current.borrow().parent.clone();
        match parent {
            Some(next) => current = next,
            None => break,
        }
    }
    current.borrow_mut().bind_local(name, value);
}
