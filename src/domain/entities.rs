//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::host::extract_domain;

/// One bookmark, flattened out of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    /// `/`-joined titles of the ancestor folders, e.g. `/Bookmark Menu/news`
    pub folder: String,
    pub title: String,
    /// Host of `uri`, empty if it has none
    pub domain: String,
    pub uri: String,
}

impl BookmarkRecord {
    pub fn new(folder: &str, title: &str, uri: &str) -> Self {
        Self {
            folder: folder.to_string(),
            title: title.to_string(),
            domain: extract_domain(uri),
            uri: uri.to_string(),
        }
    }
}

impl fmt::Display for BookmarkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.folder, self.title, self.domain, self.uri
        )
    }
}

/// Which top-level containers of the document to flatten.
///
/// A name matches a container by its title or by its Firefox root marker
/// (`bookmarksMenuFolder`, `toolbarFolder`, ...). `*` matches every container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSelection {
    names: Vec<String>,
}

/// Bookmarks menu, by its legacy title and by the root marker current
/// Firefox backups carry (their menu is titled `menu`).
pub const DEFAULT_ROOTS: [&str; 2] = ["Bookmark Menu", "bookmarksMenuFolder"];
pub const ALL_ROOTS: &str = "*";

impl Default for RootSelection {
    fn default() -> Self {
        Self::new(DEFAULT_ROOTS)
    }
}

impl RootSelection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all() -> Self {
        Self::new([ALL_ROOTS])
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matches(&self, title: &str, root: Option<&str>) -> bool {
        self.names
            .iter()
            .any(|name| name == ALL_ROOTS || name == title || Some(name.as_str()) == root)
    }
}
