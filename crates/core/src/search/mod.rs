//! Top-level library search: builtin probe, resource probe, extension probe.

pub mod classify;
pub mod suffix;

pub use classify::{PathStrategy, classify};
pub use suffix::SuffixSet;

use std::sync::Arc;
use tracing::{debug, trace};

use loadstone_plugin::{
    BuiltinRegistry, Environment, ExtensionLoader, LoadPathProvider,
};

use crate::archive::{ArchiveContentCache, NestedArchiveResolver};
use crate::error::{LoadError, Result};
use crate::library::{FoundLibrary, Library, ResourceLibrary};
use crate::naming::extension_class_name;
use crate::resource::Resource;

const FILE_SCHEME: &str = "file:";

/// Policy for the canonical load name recorded on a found library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingMode {
    /// The resolved resource's absolute/canonical path.
    #[default]
    Canonical,
    /// The literal requested path plus the matched suffix.
    Legacy,
}

/// Resolves request names into [`FoundLibrary`] handles.
///
/// Strategies run in a fixed order, each short-circuiting on first success:
/// builtin registry, then filesystem/archive resources, then native
/// extensions. Probe failures are silent; only exhaustion of all three
/// becomes a user-visible [`LoadError::NotFound`].
pub struct LibrarySearcher {
    load_path: Arc<dyn LoadPathProvider>,
    builtins: Arc<dyn BuiltinRegistry>,
    env: Arc<dyn Environment>,
    extensions: Arc<dyn ExtensionLoader>,
    archives: Arc<NestedArchiveResolver>,
    naming: NamingMode,
}

impl LibrarySearcher {
    pub fn new(
        load_path: Arc<dyn LoadPathProvider>,
        builtins: Arc<dyn BuiltinRegistry>,
        env: Arc<dyn Environment>,
        extensions: Arc<dyn ExtensionLoader>,
    ) -> Self {
        Self {
            load_path,
            builtins,
            env,
            extensions,
            archives: Arc::new(NestedArchiveResolver::new(Arc::new(
                ArchiveContentCache::new(),
            ))),
            naming: NamingMode::default(),
        }
    }

    /// Share an externally owned content cache instead of a private one.
    pub fn with_cache(mut self, cache: Arc<ArchiveContentCache>) -> Self {
        self.archives = Arc::new(NestedArchiveResolver::new(cache));
        self
    }

    pub fn with_naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    pub fn archives(&self) -> &Arc<NestedArchiveResolver> {
        &self.archives
    }

    /// Resolve a request name against the configured suffix set.
    pub fn resolve(&self, name: &str, suffixes: &SuffixSet) -> Result<FoundLibrary> {
        if let Some(found) = self.find_builtin(name, suffixes) {
            return Ok(found);
        }
        if let Some(found) = self.find_resource(name, suffixes)? {
            return Ok(found);
        }
        if let Some(found) = self.find_extension(name)? {
            return Ok(found);
        }
        Err(LoadError::NotFound(name.to_string()))
    }

    fn find_builtin(&self, name: &str, suffixes: &SuffixSet) -> Option<FoundLibrary> {
        for candidate in suffixes.candidates(name) {
            if let Some(unit) = self.builtins.lookup(&candidate) {
                debug!("found builtin {}", candidate);
                return Some(FoundLibrary::new(
                    Library::Builtin {
                        name: candidate.clone(),
                        unit,
                    },
                    candidate,
                ));
            }
        }
        None
    }

    fn find_resource(&self, name: &str, suffixes: &SuffixSet) -> Result<Option<FoundLibrary>> {
        match classify(name) {
            PathStrategy::CurrentRelative
            | PathStrategy::ParentRelative
            | PathStrategy::Absolute => Ok(self.probe(None, name, suffixes)),
            PathStrategy::HomeRelative => {
                let home = self
                    .env
                    .home()
                    .ok_or_else(|| LoadError::HomeNotSet(name.to_string()))?;
                let expanded = format!("{}/{}", home, &name[2..]);
                Ok(self.probe(None, &expanded, suffixes))
            }
            PathStrategy::FileScheme => {
                // Direct probe with the scheme stripped; a miss falls through
                // to the ordinary load-path scan with the name untouched.
                let stripped = &name[FILE_SCHEME.len()..];
                if let Some(found) = self.probe(None, stripped, suffixes) {
                    return Ok(Some(found));
                }
                Ok(self.probe_load_path(name, suffixes))
            }
            PathStrategy::LoadPath => Ok(self.probe_load_path(name, suffixes)),
        }
    }

    fn probe_load_path(&self, name: &str, suffixes: &SuffixSet) -> Option<FoundLibrary> {
        for dir in self.load_path.entries() {
            if let Some(found) = self.probe(Some(&dir), name, suffixes) {
                return Some(found);
            }
        }
        None
    }

    /// Probe every suffix candidate for a search name, optionally joined
    /// under a load-path directory. First existing candidate wins.
    fn probe(
        &self,
        load_dir: Option<&str>,
        search_name: &str,
        suffixes: &SuffixSet,
    ) -> Option<FoundLibrary> {
        let full_path = match load_dir {
            Some(dir) => format!("{dir}/{search_name}"),
            None => search_name.to_string(),
        };

        for suffix in suffixes.iter() {
            let candidate = format!("{full_path}{suffix}");
            trace!("probing {}", candidate);
            let resource = Resource::locate(&candidate, &self.archives);
            if !resource.exists() {
                continue;
            }

            let load_name = match self.naming {
                NamingMode::Canonical => resource.absolute_path(),
                NamingMode::Legacy => format!("{search_name}{suffix}"),
            };
            debug!("found {} at {}", search_name, resource.absolute_path());
            let library = ResourceLibrary::new(
                search_name,
                &full_path,
                suffix,
                resource,
                self.naming,
                self.extensions.clone(),
            );
            return Some(FoundLibrary::new(Library::Resource(library), load_name));
        }
        None
    }

    fn find_extension(&self, name: &str) -> Result<Option<FoundLibrary>> {
        let class_name = extension_class_name(name);
        match self.extensions.instantiate(&class_name) {
            Ok(Some(unit)) => {
                debug!("found extension {}", class_name);
                Ok(Some(FoundLibrary::new(
                    Library::Extension { class_name, unit },
                    name.to_string(),
                )))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(LoadError::Extension {
                class_name,
                reason: e.to_string(),
            }),
        }
    }
}
