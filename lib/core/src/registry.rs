//! Generic name-keyed registry.
//!
//! Templates, transforms, workflows and rules are all definitions identified
//! by a unique name. [`NamedRegistry`] stores any such definition: registering
//! a name that already exists silently replaces the previous definition,
//! lookups never fail, and names are listed in first-registration order.

use std::collections::HashMap;
use tracing::debug;

/// A definition that is identified by its name.
pub trait Named {
    /// The unique name this definition is registered under.
    fn name(&self) -> &str;
}

/// In-memory store of named definitions.
#[derive(Debug, Clone)]
pub struct NamedRegistry<T> {
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Named> NamedRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition, replacing any previous one with the same name.
    ///
    /// Returns the replaced definition, if there was one.
    pub fn register(&mut self, definition: T) -> Option<T> {
        let name = definition.name().to_string();
        let previous = self.entries.insert(name.clone(), definition);
        if previous.is_some() {
            debug!(%name, "replaced registered definition");
        } else {
            debug!(%name, "registered definition");
            self.order.push(name);
        }
        previous
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Returns whether a definition is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names of all registered definitions.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Iterates over all registered definitions.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|name| self.entries.get(name))
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
