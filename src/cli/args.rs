//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::LengthCheck;

/// Flatten Firefox bookmark stores into folder/title/domain/uri records
#[derive(Parser, Debug)]
#[command(name = "foxmarks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the configured length check (ignore, warn, strict)
    #[arg(long, global = true)]
    pub length_check: Option<LengthCheck>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List bookmarks as flat records
    List {
        /// Bookmark store (.jsonlz4); newest profile backup if omitted
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Root container to flatten (title or root marker, "*" for all)
        #[arg(short, long = "root")]
        roots: Vec<String>,
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },

    /// Show folder hierarchy as tree
    Tree {
        /// Bookmark store (.jsonlz4); newest profile backup if omitted
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Root container to show (title or root marker, "*" for all)
        #[arg(short, long = "root")]
        roots: Vec<String>,
    },

    /// Decompress a bookmark store to its JSON document
    Unpack {
        /// Bookmark store (.jsonlz4)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Compress a JSON document into a bookmark store (fixtures)
    Pack {
        /// JSON bookmark document
        #[arg(value_hint = ValueHint::FilePath)]
        json: PathBuf,
        /// Output .jsonlz4 file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },

    /// Compare the bookmarks of two stores
    Diff {
        /// Store to check
        #[arg(value_hint = ValueHint::FilePath)]
        got: PathBuf,
        /// Expected store
        #[arg(value_hint = ValueHint::FilePath)]
        want: PathBuf,
        /// Root container to compare (title or root marker, "*" for all)
        #[arg(short, long = "root")]
        roots: Vec<String>,
    },

    /// Print path of newest bookmark backup
    Locate,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show global config file location
    Path,
}
