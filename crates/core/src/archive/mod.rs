//! Nested-archive reading with a shared, lazily populated content cache.

mod cache;
mod nested;

pub use cache::{ArchiveContentCache, ContentTable};
pub use nested::{EntryStream, NestedArchiveResolver};
