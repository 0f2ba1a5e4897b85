//! Process-wide cache of decoded archive content, keyed by locator prefix.
//!
//! Each table holds every entry of one opened nesting level, fully decoded.
//! Archives are assumed immutable for the lifetime of the hosting process, so
//! tables are never evicted or invalidated. Population is optimistic:
//! concurrent first lookups of the same prefix may decode the same archive
//! twice, but only the first published table is kept and it is never
//! rewritten afterwards.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Entry name → raw decoded bytes for one archive level.
pub type ContentTable = HashMap<String, Arc<[u8]>>;

#[derive(Debug, Default)]
pub struct ArchiveContentCache {
    tables: DashMap<String, Arc<ContentTable>>,
    decodes: AtomicU64,
}

impl ArchiveContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, prefix: &str) -> Option<Arc<ContentTable>> {
        self.tables.get(prefix).map(|table| table.value().clone())
    }

    /// Publish a fully built table for a prefix. If another thread won the
    /// race, its table stands and the argument is discarded; the returned
    /// table is the one all readers will see.
    pub fn publish(&self, prefix: String, table: ContentTable) -> Arc<ContentTable> {
        self.tables
            .entry(prefix)
            .or_insert_with(|| Arc::new(table))
            .value()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Number of full-archive decodes performed so far. Exposed so tests can
    /// verify that repeated resolutions reuse cached tables.
    pub fn decode_count(&self) -> u64 {
        self.decodes.load(Ordering::Relaxed)
    }

    pub(crate) fn record_decode(&self) {
        self.decodes.fetch_add(1, Ordering::Relaxed);
    }
}
