//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait but are themselves
//! concrete structs, not traits.

mod bookmarks;
mod locator;

pub use bookmarks::BookmarkService;
pub use locator::{default_profiles_root, ProfileLocator, BACKUP_DIR, BACKUP_EXTENSION};
