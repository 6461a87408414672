//! Firefox profile lookup
//!
//! Finds the newest `*.jsonlz4` file in a profile's `bookmarkbackups` directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::FileSystem;

pub const BACKUP_DIR: &str = "bookmarkbackups";
pub const BACKUP_EXTENSION: &str = "jsonlz4";

/// `profiles root / <profile> / bookmarkbackups / <file>`
const MAX_DEPTH: usize = 3;

/// Default location of Firefox profiles for the current platform.
pub fn default_profiles_root() -> Option<PathBuf> {
    let base = directories::BaseDirs::new()?;
    let root = if cfg!(target_os = "macos") {
        base.data_dir().join("Firefox").join("Profiles")
    } else if cfg!(windows) {
        base.data_dir().join("Mozilla").join("Firefox").join("Profiles")
    } else {
        base.home_dir().join(".mozilla").join("firefox")
    };
    Some(root)
}

/// Locates bookmark backups below a profile directory or the profiles root.
pub struct ProfileLocator {
    fs: Arc<dyn FileSystem>,
    search_root: Option<PathBuf>,
}

impl ProfileLocator {
    /// Search below `search_root`, or the platform default when `None`.
    pub fn new(fs: Arc<dyn FileSystem>, search_root: Option<PathBuf>) -> Self {
        Self { fs, search_root }
    }

    pub fn search_root(&self) -> Option<PathBuf> {
        self.search_root.clone().or_else(default_profiles_root)
    }

    /// Path of the most recently modified bookmark backup.
    pub fn locate(&self) -> ApplicationResult<PathBuf> {
        let root = self.search_root().ok_or_else(|| ApplicationError::Config {
            message: "cannot determine home directory, set profile_dir".to_string(),
        })?;
        debug!("locate: searching {}", root.display());

        if !self.fs.is_dir(&root) {
            return Err(ApplicationError::ProfileNotFound(root));
        }

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for path in backups_below(&root) {
            let Ok(modified) = self.fs.modified(&path) else {
                trace!("locate: no mtime for {}", path.display());
                continue;
            };
            trace!("locate: candidate {}", path.display());
            if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
                newest = Some((modified, path));
            }
        }

        newest
            .map(|(_, path)| path)
            .ok_or(ApplicationError::ProfileNotFound(root))
    }
}

fn backups_below(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .max_depth(MAX_DEPTH)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_backup(p))
}

fn is_backup(path: &Path) -> bool {
    let in_backup_dir = path
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|name| name == BACKUP_DIR);
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext == BACKUP_EXTENSION);
    in_backup_dir && has_extension
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_backup() {
        assert!(is_backup(Path::new(
            "/p/abc.default/bookmarkbackups/bookmarks-2024-01-01.jsonlz4"
        )));
        assert!(!is_backup(Path::new("/p/abc.default/bookmarkbackups/notes.txt")));
        assert!(!is_backup(Path::new("/p/abc.default/sessionstore.jsonlz4")));
    }
}
