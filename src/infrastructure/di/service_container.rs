//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{BookmarkService, ProfileLocator};
use crate::config::Settings;
use crate::domain::RootSelection;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings, I/O boundaries and the services built from them.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    pub fn bookmarks(&self) -> BookmarkService {
        BookmarkService::new(Arc::clone(&self.fs), self.settings.length_check)
    }

    pub fn locator(&self) -> ProfileLocator {
        ProfileLocator::new(Arc::clone(&self.fs), self.settings.profile_dir.clone())
    }

    /// Root selection from settings, unless `overrides` names roots explicitly.
    pub fn root_selection(&self, overrides: &[String]) -> RootSelection {
        if overrides.is_empty() {
            RootSelection::new(self.settings.roots.iter().cloned())
        } else {
            RootSelection::new(overrides.iter().cloned())
        }
    }
}
