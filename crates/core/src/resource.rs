//! Located resources: plain files and (possibly nested) archive entries.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::trace;

use crate::archive::NestedArchiveResolver;
use crate::error::Result;
use crate::locator::{CompoundLocator, NESTING_DELIMITER};

const FILE_SCHEME: &str = "file:";
const JAR_SCHEME: &str = "jar:";

/// Closed set of resource kinds a candidate path can denote. Anything whose
/// path carries the nesting delimiter (or a `jar:` wrapper) lives inside an
/// archive and is reached through the nested-archive resolver; everything
/// else is a regular filesystem path.
#[derive(Clone)]
pub enum Resource {
    Regular(PathBuf),
    Archive(ArchiveEntryResource),
}

#[derive(Clone)]
pub struct ArchiveEntryResource {
    resolver: Arc<NestedArchiveResolver>,
    locator: CompoundLocator,
}

impl Resource {
    pub fn locate(raw: &str, archives: &Arc<NestedArchiveResolver>) -> Self {
        if raw.contains(NESTING_DELIMITER) || raw.starts_with(JAR_SCHEME) {
            Resource::Archive(ArchiveEntryResource {
                resolver: archives.clone(),
                locator: CompoundLocator::parse(raw),
            })
        } else {
            let path = raw.strip_prefix(FILE_SCHEME).unwrap_or(raw);
            Resource::Regular(PathBuf::from(path))
        }
    }

    /// Existence probe. For archive entries this resolves the whole nesting
    /// chain; a probe failure of any kind reads as "not here" so the caller
    /// moves on to the next candidate.
    pub fn exists(&self) -> bool {
        match self {
            Resource::Regular(path) => path.exists(),
            Resource::Archive(entry) => match entry.resolver.open(&entry.locator) {
                Ok(_) => true,
                Err(err) => {
                    trace!("archive probe missed {}: {}", entry.locator, err);
                    false
                }
            },
        }
    }

    /// Canonical textual name for the resource: the absolute filesystem path,
    /// or the re-joined locator for an archive entry.
    pub fn absolute_path(&self) -> String {
        match self {
            Resource::Regular(path) => std::path::absolute(path)
                .unwrap_or_else(|_| path.clone())
                .display()
                .to_string(),
            Resource::Archive(entry) => entry.locator.to_string(),
        }
    }

    /// Full content of the resource. Callers read at load time, not at
    /// resolution time; a resource that existed when probed may be gone here.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        match self {
            Resource::Regular(path) => Ok(std::fs::read(path)?),
            Resource::Archive(entry) => entry.resolver.read(&entry.locator),
        }
    }
}
