//! Resolved libraries and their load dispatch.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use loadstone_plugin::{ExecutionHost, ExtensionLoader, Loadable};

use crate::error::{LoadError, Result};
use crate::naming::extension_class_name;
use crate::resource::Resource;
use crate::search::suffix::{ARCHIVE_SUFFIX, COMPILED_SUFFIX};
use crate::search::NamingMode;

/// A resolved library plus the canonical name recorded as "this unit is now
/// loaded". Immutable once built.
pub struct FoundLibrary {
    library: Library,
    load_name: String,
}

impl FoundLibrary {
    pub fn new(library: Library, load_name: String) -> Self {
        Self { library, load_name }
    }

    pub fn load_name(&self) -> &str {
        &self.load_name
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn load(&self, host: &dyn ExecutionHost, wrap: bool) -> Result<()> {
        self.library.load(host, wrap)
    }
}

impl fmt::Debug for FoundLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoundLibrary")
            .field("library", &self.library)
            .field("load_name", &self.load_name)
            .finish()
    }
}

/// The closed set of library kinds a resolution can produce.
pub enum Library {
    /// Pre-registered unit; never touches the filesystem.
    Builtin {
        name: String,
        unit: Arc<dyn Loadable>,
    },
    /// Backed by a located resource (plain file, archive, or nested entry).
    Resource(ResourceLibrary),
    /// Constructed native extension, found by derived class name.
    Extension {
        class_name: String,
        unit: Arc<dyn Loadable>,
    },
}

impl Library {
    pub fn load(&self, host: &dyn ExecutionHost, wrap: bool) -> Result<()> {
        match self {
            Library::Builtin { unit, .. } => Ok(unit.load(host, wrap)?),
            Library::Resource(resource) => resource.load(host, wrap),
            Library::Extension { class_name, unit } => {
                unit.load(host, wrap).map_err(|e| LoadError::Extension {
                    class_name: class_name.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

// The loadable units are opaque trait objects, so only the identifying names
// are shown.
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Library::Builtin { name, .. } => f
                .debug_struct("Builtin")
                .field("name", name)
                .finish_non_exhaustive(),
            Library::Resource(resource) => f
                .debug_struct("Resource")
                .field("location", &resource.location)
                .finish_non_exhaustive(),
            Library::Extension { class_name, .. } => f
                .debug_struct("Extension")
                .field("class_name", class_name)
                .finish_non_exhaustive(),
        }
    }
}

/// A library backed by a located resource. The concrete loader is chosen by
/// the resource's trailing form: archive, compiled unit, or source (the
/// default).
pub struct ResourceLibrary {
    search_name: String,
    literal_path: String,
    suffix: String,
    location: String,
    resource: Resource,
    naming: NamingMode,
    extensions: Arc<dyn ExtensionLoader>,
}

impl ResourceLibrary {
    pub(crate) fn new(
        search_name: &str,
        literal_path: &str,
        suffix: &str,
        resource: Resource,
        naming: NamingMode,
        extensions: Arc<dyn ExtensionLoader>,
    ) -> Self {
        let location = resource.absolute_path();
        Self {
            search_name: search_name.to_string(),
            literal_path: literal_path.to_string(),
            suffix: suffix.to_string(),
            location,
            resource,
            naming,
            extensions,
        }
    }

    /// Absolute location of the backing resource.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn load(&self, host: &dyn ExecutionHost, wrap: bool) -> Result<()> {
        if self.location.ends_with(ARCHIVE_SUFFIX) {
            self.load_archive(host, wrap)
        } else if self.location.ends_with(COMPILED_SUFFIX) {
            let bytes = self.stream_bytes()?;
            host.load_compiled(&self.display_name(), bytes, wrap)?;
            Ok(())
        } else {
            let bytes = self.stream_bytes()?;
            host.load_source(&self.display_name(), bytes, wrap)?;
            Ok(())
        }
    }

    /// The name handed to the execution collaborators, chosen by the naming
    /// mode configured at resolver construction.
    fn display_name(&self) -> String {
        match self.naming {
            NamingMode::Canonical => self.location.clone(),
            NamingMode::Legacy => {
                if self.search_name.starts_with("./") {
                    format!("{}{}", self.search_name, self.suffix)
                } else {
                    format!("{}{}", self.literal_path, self.suffix)
                }
            }
        }
    }

    /// Obtain the resource's bytes, deferring unreadable-stream failures to
    /// load time and reporting them against the originally requested name.
    fn stream_bytes(&self) -> Result<Vec<u8>> {
        self.resource.bytes().map_err(|err| {
            debug!("stream for {} unreadable: {}", self.location, err);
            LoadError::NotFound(self.search_name.clone())
        })
    }

    fn load_archive(&self, host: &dyn ExecutionHost, wrap: bool) -> Result<()> {
        host.register_archive_root(&self.location)?;

        // An archive may carry an extension named after the request; absence
        // is silent, a construction failure is a load error.
        let class_name = extension_class_name(&self.search_name);
        match self.extensions.instantiate(&class_name) {
            Ok(Some(unit)) => {
                debug!("loading archive extension {}", class_name);
                unit.load(host, wrap).map_err(|e| LoadError::Extension {
                    class_name: class_name.clone(),
                    reason: e.to_string(),
                })
            }
            Ok(None) => Ok(()),
            Err(e) => Err(LoadError::Extension {
                class_name,
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullExtensions;
    use loadstone_plugin::HostResult;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct NameHost {
        names: Mutex<Vec<String>>,
    }

    impl ExecutionHost for NameHost {
        fn load_source(&self, display_name: &str, _source: Vec<u8>, _wrap: bool) -> HostResult<()> {
            self.names.lock().unwrap().push(display_name.to_string());
            Ok(())
        }

        fn load_compiled(&self, display_name: &str, _bytes: Vec<u8>, _wrap: bool) -> HostResult<()> {
            self.names.lock().unwrap().push(display_name.to_string());
            Ok(())
        }

        fn register_archive_root(&self, _path: &str) -> HostResult<()> {
            Ok(())
        }
    }

    fn resource_library(
        search_name: &str,
        literal_path: &str,
        path: &str,
        naming: NamingMode,
    ) -> ResourceLibrary {
        ResourceLibrary::new(
            search_name,
            literal_path,
            ".rb",
            Resource::Regular(PathBuf::from(path)),
            naming,
            Arc::new(NullExtensions),
        )
    }

    #[test]
    fn legacy_display_name_keeps_dot_relative_requests() {
        let library = resource_library("./foo", "./foo", "/lib/foo.rb", NamingMode::Legacy);
        assert_eq!(library.display_name(), "./foo.rb");
    }

    #[test]
    fn legacy_display_name_uses_literal_path_for_plain_requests() {
        let library = resource_library("foo", "/lib1/foo", "/lib1/foo.rb", NamingMode::Legacy);
        assert_eq!(library.display_name(), "/lib1/foo.rb");
    }

    #[test]
    fn canonical_display_name_is_the_resolved_location() {
        let library = resource_library("./foo", "./foo", "/lib/foo.rb", NamingMode::Canonical);
        assert_eq!(library.display_name(), library.location());
    }

    #[test]
    fn legacy_dot_relative_dispatch_passes_the_requested_name() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("gadget.rb");
        std::fs::write(&path, b"body").unwrap();

        let library = resource_library(
            "./gadget",
            "./gadget",
            &path.display().to_string(),
            NamingMode::Legacy,
        );
        let host = NameHost::default();
        library.load(&host, false).unwrap();
        assert_eq!(*host.names.lock().unwrap(), vec!["./gadget.rb".to_string()]);
    }
}
