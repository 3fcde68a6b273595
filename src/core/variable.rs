use rustc_hash::FxHashMap;
use std::{
    fmt::Display,
    sync::{Arc, PoisonError, RwLock, Weak},
};

/// A propositional variable, identified by its name.
///
/// Two variables are equal iff their names are equal.
/// Variables built by the same [`Interner`] additionally share their name allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(Arc<str>);

impl Variable {
    /// Builds a variable that is not registered in any interner.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the name of this variable.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns `true` iff both handles share the same allocation.
    pub fn is_same_handle(&self, other: &Variable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A table mapping names to variables.
///
/// The table only keeps weak references: once every handle for a name is dropped, the name may be reclaimed by [`purge`](Self::purge).
/// Lookups take a read lock; only the first creation of a name takes the write lock, so interners may be shared between threads.
#[derive(Default)]
pub struct Interner {
    names: RwLock<FxHashMap<Box<str>, Weak<str>>>,
}

impl Interner {
    /// Builds an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the variable with the given name, creating it if needed.
    pub fn variable(&self, name: &str) -> Variable {
        {
            let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(v) = names.get(name).and_then(Weak::upgrade) {
                return Variable(v);
            }
        }
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(v) = names.get(name).and_then(Weak::upgrade) {
            return Variable(v);
        }
        let shared: Arc<str> = Arc::from(name);
        names.insert(Box::from(name), Arc::downgrade(&shared));
        Variable(shared)
    }

    /// Removes the entries whose variables are no longer referenced.
    pub fn purge(&self) {
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, w| w.strong_count() > 0);
    }

    /// Returns the number of names currently registered, reclaimed or not.
    pub fn len(&self) -> usize {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` iff no name is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
