//! Flatten Firefox `jsonlz4` bookmark stores into flat bookmark records.
//!
//! Layers:
//! - [`domain`]: container codec, tree model, flattening, domain extraction
//! - [`application`]: services reading stores and locating profile backups
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{BookmarkRecord, FormatError, LengthCheck, RootSelection};
