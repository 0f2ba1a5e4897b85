//! Collaborator traits for the loadstone resolver core.
//!
//! The resolver locates libraries; it never executes them. Everything that
//! touches an execution context — running source, loading compiled units,
//! registering archive roots, instantiating native extensions — goes through
//! the traits in this crate, so hosts (and tests) can supply their own
//! implementations.

use std::sync::Arc;

/// Result type for host-side operations. Hosts report failures as boxed
/// errors; the core converts them into its own error type at the boundary.
pub type HostResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// An execution context that can consume resolved libraries.
pub trait ExecutionHost: Send + Sync {
    /// Load source text under the given display name.
    fn load_source(&self, display_name: &str, source: Vec<u8>, wrap: bool) -> HostResult<()>;

    /// Load a pre-compiled unit. A host that performs the load purely as a
    /// side effect of consuming the bytes has nothing to hand back and simply
    /// returns `Ok(())`; that is success, not an error.
    fn load_compiled(&self, display_name: &str, bytes: Vec<u8>, wrap: bool) -> HostResult<()>;

    /// Make an archive available as a load root for subsequent lookups.
    fn register_archive_root(&self, path: &str) -> HostResult<()>;
}

/// A pre-built loadable unit: either a registered builtin or a constructed
/// native extension.
pub trait Loadable: Send + Sync {
    fn load(&self, host: &dyn ExecutionHost, wrap: bool) -> HostResult<()>;
}

/// Registry of builtin libraries, keyed by the exact suffixed name
/// (e.g. `"thread.rb"`). Builtins never touch the filesystem.
pub trait BuiltinRegistry: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Arc<dyn Loadable>>;
}

/// Ordered base directories scanned for plain names. The sequence is owned by
/// the surrounding runtime and may change between resolutions; it is re-read
/// on every request.
pub trait LoadPathProvider: Send + Sync {
    fn entries(&self) -> Vec<String>;
}

/// Environment lookup used only for `~/`-prefixed names.
pub trait Environment: Send + Sync {
    fn home(&self) -> Option<String>;
}

/// Native-extension instantiation by derived class name.
pub trait ExtensionLoader: Send + Sync {
    /// `Ok(None)` means no such extension exists — a normal, silent outcome.
    /// `Err` means the extension exists but could not be constructed, which
    /// callers surface as a load error.
    fn instantiate(&self, class_name: &str) -> HostResult<Option<Arc<dyn Loadable>>>;
}
