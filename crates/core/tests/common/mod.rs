//! Shared fixtures: zip builders, a recording execution host, and
//! collaborator stubs.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use loadstone_plugin::{ExecutionHost, ExtensionLoader, HostResult, Loadable};
use zip::write::SimpleFileOptions;

/// Write a zip archive with the given entries to a file on disk.
pub fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

/// Build a zip archive in memory, for nesting inside another archive.
pub fn archive_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Source { name: String, bytes: Vec<u8> },
    Compiled { name: String, bytes: Vec<u8> },
    ArchiveRoot(String),
}

/// Execution host that records every collaborator call.
#[derive(Default)]
pub struct RecordingHost {
    pub events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ExecutionHost for RecordingHost {
    fn load_source(&self, display_name: &str, source: Vec<u8>, _wrap: bool) -> HostResult<()> {
        self.events.lock().unwrap().push(HostEvent::Source {
            name: display_name.to_string(),
            bytes: source,
        });
        Ok(())
    }

    fn load_compiled(&self, display_name: &str, bytes: Vec<u8>, _wrap: bool) -> HostResult<()> {
        self.events.lock().unwrap().push(HostEvent::Compiled {
            name: display_name.to_string(),
            bytes,
        });
        Ok(())
    }

    fn register_archive_root(&self, path: &str) -> HostResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(HostEvent::ArchiveRoot(path.to_string()));
        Ok(())
    }
}

/// Loadable unit that counts how many times it was loaded.
#[derive(Default)]
pub struct CountingUnit {
    pub loads: AtomicUsize,
}

impl CountingUnit {
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Loadable for CountingUnit {
    fn load(&self, _host: &dyn ExecutionHost, _wrap: bool) -> HostResult<()> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Extension loader over a fixed table of constructible class names, with an
/// optional set of names that exist but fail to construct.
#[derive(Default)]
pub struct TableExtensions {
    pub present: Vec<(String, Arc<CountingUnit>)>,
    pub broken: Vec<String>,
}

impl TableExtensions {
    pub fn with_present(mut self, class_name: &str, unit: Arc<CountingUnit>) -> Self {
        self.present.push((class_name.to_string(), unit));
        self
    }

    pub fn with_broken(mut self, class_name: &str) -> Self {
        self.broken.push(class_name.to_string());
        self
    }
}

impl ExtensionLoader for TableExtensions {
    fn instantiate(&self, class_name: &str) -> HostResult<Option<Arc<dyn Loadable>>> {
        if self.broken.iter().any(|name| name == class_name) {
            return Err(format!("wrong runtime version for `{class_name}`").into());
        }
        Ok(self
            .present
            .iter()
            .find(|(name, _)| name == class_name)
            .map(|(_, unit)| unit.clone() as Arc<dyn Loadable>))
    }
}
