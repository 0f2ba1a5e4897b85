//! Recursive resolution of compound locators into byte streams.

use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::sync::Arc;
use tracing::{debug, trace};
use zip::ZipArchive;
use zip::result::ZipError;

use super::cache::{ArchiveContentCache, ContentTable};
use crate::error::{LoadError, Result};
use crate::locator::CompoundLocator;

/// Readable stream over a resolved entry: either the base file itself (for a
/// single-segment locator) or the in-memory bytes pulled out of the nesting
/// chain.
pub enum EntryStream {
    File(File),
    Memory(Cursor<Arc<[u8]>>),
}

impl Read for EntryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            EntryStream::File(file) => file.read(buf),
            EntryStream::Memory(cursor) => cursor.read(buf),
        }
    }
}

/// Opens each nesting level of a compound locator in turn, consulting and
/// populating the shared content cache, and returns a stream over the
/// innermost entry.
pub struct NestedArchiveResolver {
    cache: Arc<ArchiveContentCache>,
}

impl NestedArchiveResolver {
    pub fn new(cache: Arc<ArchiveContentCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<ArchiveContentCache> {
        &self.cache
    }

    /// Resolve a locator to a stream over its deepest entry.
    ///
    /// A single-segment locator opens the base file directly and never
    /// touches the cache. A missing entry at any depth fails with
    /// [`LoadError::NotFound`] carrying the full locator text; I/O failures
    /// and malformed archives fail with [`LoadError::ArchiveRead`].
    pub fn open(&self, locator: &CompoundLocator) -> Result<EntryStream> {
        if !locator.is_compound() {
            let file = File::open(locator.base_path())
                .map_err(|e| read_error(locator.base(), e))?;
            return Ok(EntryStream::File(file));
        }

        let bytes = self.resolve_entry(locator, 1, None)?;
        Ok(EntryStream::Memory(Cursor::new(bytes)))
    }

    /// Convenience wrapper that drains the resolved stream.
    pub fn read(&self, locator: &CompoundLocator) -> Result<Vec<u8>> {
        let mut stream = self.open(locator)?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| read_error(&locator.to_string(), e))?;
        Ok(bytes)
    }

    fn resolve_entry(
        &self,
        locator: &CompoundLocator,
        depth: usize,
        inherited: Option<Arc<[u8]>>,
    ) -> Result<Arc<[u8]>> {
        let entry_name = locator.segments()[depth].as_str();

        // Top-level archive sitting directly on the filesystem: random
        // access, no need to decode the whole thing.
        if depth == 1 && locator.base_is_plain_file() {
            trace!("opening base archive {} for entry {}", locator.base(), entry_name);
            let file =
                File::open(locator.base_path()).map_err(|e| read_error(locator.base(), e))?;
            let mut archive = ZipArchive::new(file)
                .map_err(|e| read_error(locator.base(), io::Error::other(e)))?;
            let bytes = match archive.by_name(entry_name) {
                Ok(mut entry) => {
                    let mut buf = Vec::with_capacity(entry.size() as usize);
                    entry
                        .read_to_end(&mut buf)
                        .map_err(|e| read_error(locator.base(), e))?;
                    Arc::from(buf)
                }
                Err(ZipError::FileNotFound) => {
                    return Err(LoadError::NotFound(locator.to_string()));
                }
                Err(e) => return Err(read_error(locator.base(), io::Error::other(e))),
            };
            return self.descend(locator, depth, bytes);
        }

        let prefix = locator.prefix(depth);
        let table = match self.cache.lookup(&prefix) {
            Some(table) => table,
            None => {
                let level = match inherited {
                    Some(bytes) => bytes,
                    None => Arc::from(
                        fs::read(locator.base_path())
                            .map_err(|e| read_error(locator.base(), e))?,
                    ),
                };
                // Decode fully before publishing: a failure here leaves the
                // prefix absent rather than half-populated.
                let table = decode_archive(&level).map_err(|e| read_error(&prefix, e))?;
                self.cache.record_decode();
                debug!("cached {} entries for archive prefix {}", table.len(), prefix);
                self.cache.publish(prefix, table)
            }
        };

        match table.get(entry_name) {
            Some(bytes) => self.descend(locator, depth, bytes.clone()),
            None => Err(LoadError::NotFound(locator.to_string())),
        }
    }

    fn descend(
        &self,
        locator: &CompoundLocator,
        depth: usize,
        bytes: Arc<[u8]>,
    ) -> Result<Arc<[u8]>> {
        if depth + 1 < locator.segments().len() {
            // Not at the innermost segment: the bytes are the next archive.
            self.resolve_entry(locator, depth + 1, Some(bytes))
        } else {
            Ok(bytes)
        }
    }
}

/// Decode every entry of an in-memory archive into a content table.
fn decode_archive(bytes: &[u8]) -> io::Result<ContentTable> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(io::Error::other)?;
    let mut table = ContentTable::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(io::Error::other)?;
        let name = entry.name().to_string();
        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buf)?;
        table.insert(name, Arc::from(buf));
    }
    Ok(table)
}

fn read_error(path: &str, source: io::Error) -> LoadError {
    LoadError::ArchiveRead {
        path: path.to_string(),
        source,
    }
}
