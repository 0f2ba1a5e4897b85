//! Loadstone: resolution of symbolic load requests into openable resources.
//!
//! A request name (`"foo/bar"`, `"./local"`, `"~/lib/x"`, `"file:thing.jar"`,
//! `"/abs/outer.jar!/inner.jar!/script.rb"`) is classified by shape, expanded
//! against an ordered suffix set, and probed against the load path, the
//! builtin registry, nested archives, and the native-extension loader. The
//! first hit is wrapped into a [`FoundLibrary`] carrying a canonical load
//! name; actually executing it is delegated to the host traits in
//! `loadstone-plugin`.

pub mod archive;
pub mod error;
pub mod host;
pub mod library;
pub mod locator;
pub mod logging;
pub mod naming;
pub mod resource;
pub mod search;

pub use archive::{ArchiveContentCache, EntryStream, NestedArchiveResolver};
pub use error::{LoadError, Result};
pub use library::{FoundLibrary, Library, ResourceLibrary};
pub use locator::{CompoundLocator, NESTING_DELIMITER};
pub use resource::Resource;
pub use search::{LibrarySearcher, NamingMode, PathStrategy, SuffixSet};
