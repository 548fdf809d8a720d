//! The host's compiled-in baseline.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::entry::EntryPoint;
use crate::library::{ArchiveIndex, Resource};
use crate::resolver::Resolver;
use crate::tray::TrayIconProvider;

/// Entry points and tray icon providers known to the launcher binary,
/// keyed by fully-qualified name.
#[derive(Clone, Default)]
pub struct Registry {
    entry_points: HashMap<String, Arc<dyn EntryPoint>>,
    tray_providers: HashMap<String, Arc<dyn TrayIconProvider>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_point(mut self, name: impl Into<String>, entry: impl EntryPoint + 'static) -> Self {
        self.entry_points.insert(name.into(), Arc::new(entry));
        self
    }

    pub fn with_tray_provider(
        mut self,
        name: impl Into<String>,
        provider: impl TrayIconProvider + 'static,
    ) -> Self {
        self.tray_providers.insert(name.into(), Arc::new(provider));
        self
    }

    /// Registered entry point names, sorted.
    pub fn entry_point_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entry_points.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tray_providers: Vec<&String> = self.tray_providers.keys().collect();
        tray_providers.sort_unstable();
        f.debug_struct("Registry")
            .field("entry_points", &self.entry_point_names())
            .field("tray_providers", &tray_providers)
            .finish()
    }
}

impl Resolver for Registry {
    fn entry_point(&self, name: &str) -> Option<Arc<dyn EntryPoint>> {
        self.entry_points.get(name).cloned()
    }

    fn tray_provider(&self, name: &str) -> Option<Arc<dyn TrayIconProvider>> {
        self.tray_providers.get(name).cloned()
    }
}

/// Fallback layer: the registry plus the resources of the outer archive.
#[derive(Clone, Debug)]
pub struct Baseline {
    registry: Registry,
    archive: Option<ArchiveIndex>,
}

impl Baseline {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            archive: None,
        }
    }

    pub fn with_archive(mut self, archive: ArchiveIndex) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Resolver for Baseline {
    fn entry_point(&self, name: &str) -> Option<Arc<dyn EntryPoint>> {
        self.registry.entry_point(name)
    }

    fn tray_provider(&self, name: &str) -> Option<Arc<dyn TrayIconProvider>> {
        self.registry.tray_provider(name)
    }

    fn resource(&self, name: &str) -> Option<Resource> {
        self.archive.as_ref().and_then(|archive| archive.resource(name))
    }
}
