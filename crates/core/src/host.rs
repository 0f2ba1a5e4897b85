//! Stock collaborator implementations for embedding hosts and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use loadstone_plugin::{
    BuiltinRegistry, Environment, ExtensionLoader, HostResult, LoadPathProvider, Loadable,
};

/// Home lookup backed by the process environment.
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn home(&self) -> Option<String> {
        dirs::home_dir().map(|path| path.display().to_string())
    }
}

/// Home pinned at construction. Useful for tests and sandboxed hosts.
pub struct FixedEnvironment {
    home: Option<String>,
}

impl FixedEnvironment {
    pub fn new(home: Option<String>) -> Self {
        Self { home }
    }
}

impl Environment for FixedEnvironment {
    fn home(&self) -> Option<String> {
        self.home.clone()
    }
}

/// Load path owned by the surrounding runtime, mutable between requests.
#[derive(Default)]
pub struct SharedLoadPath {
    entries: RwLock<Vec<String>>,
}

impl SharedLoadPath {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().map(Into::into).collect()),
        }
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.write().expect("load path poisoned").push(entry.into());
    }

    pub fn replace<I, S>(&self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.entries.write().expect("load path poisoned") =
            entries.into_iter().map(Into::into).collect();
    }
}

impl LoadPathProvider for SharedLoadPath {
    fn entries(&self) -> Vec<String> {
        self.entries.read().expect("load path poisoned").clone()
    }
}

/// Builtin registry over a fixed map of suffixed names.
#[derive(Default)]
pub struct MapBuiltins {
    units: HashMap<String, Arc<dyn Loadable>>,
}

impl MapBuiltins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, name: impl Into<String>, unit: Arc<dyn Loadable>) -> Self {
        self.units.insert(name.into(), unit);
        self
    }
}

impl BuiltinRegistry for MapBuiltins {
    fn lookup(&self, name: &str) -> Option<Arc<dyn Loadable>> {
        self.units.get(name).cloned()
    }
}

/// Extension loader for hosts without native extensions: everything is
/// silently absent.
pub struct NullExtensions;

impl ExtensionLoader for NullExtensions {
    fn instantiate(&self, _class_name: &str) -> HostResult<Option<Arc<dyn Loadable>>> {
        Ok(None)
    }
}
