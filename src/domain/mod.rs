//! Domain layer: container codec, bookmark tree and flattening
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod container;
pub mod diff;
pub mod entities;
pub mod error;
pub mod flatten;
pub mod host;
pub mod node;

pub use container::{ContainerHeader, LengthCheck};
pub use diff::diff_bookmarks;
pub use entities::*;
pub use error::{DomainError, FormatError};
pub use flatten::{flatten, flatten_json, parse_tree, select_roots};
pub use host::extract_domain;
pub use node::{Bookmark, Folder, RawNode, TreeNode};
