//! Bookmark store service
//!
//! Reads a `jsonlz4` bookmark store and turns it into flat records.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    container, flatten, parse_tree, select_roots, BookmarkRecord, Folder, LengthCheck,
    RootSelection, TreeNode,
};
use crate::infrastructure::traits::FileSystem;

/// Service for decoding bookmark stores.
pub struct BookmarkService {
    fs: Arc<dyn FileSystem>,
    length_check: LengthCheck,
}

impl BookmarkService {
    /// Create a new bookmark service.
    pub fn new(fs: Arc<dyn FileSystem>, length_check: LengthCheck) -> Self {
        Self { fs, length_check }
    }

    /// Decode the container at `path` into its raw JSON bytes.
    #[instrument(level = "debug", skip(self))]
    pub fn unpack_file(&self, path: &Path) -> ApplicationResult<Vec<u8>> {
        let bytes = self.fs.read(path).with_path_context("read bookmark store", path)?;
        debug!("unpack_file: read {} bytes", bytes.len());
        Ok(container::decode(&bytes, self.length_check)?)
    }

    /// Parse the bookmark store at `path` into its tree.
    pub fn tree_file(&self, path: &Path) -> ApplicationResult<TreeNode> {
        let raw = self.unpack_file(path)?;
        Ok(parse_tree(&raw)?)
    }

    /// Flatten the bookmark store at `path`.
    pub fn read_file(
        &self,
        path: &Path,
        selection: &RootSelection,
    ) -> ApplicationResult<Vec<BookmarkRecord>> {
        let tree = self.tree_file(path)?;
        Ok(flatten(&tree, selection))
    }

    /// Flatten a bookmark store supplied as a byte stream.
    pub fn read_from<R: Read>(
        &self,
        mut reader: R,
        selection: &RootSelection,
    ) -> ApplicationResult<Vec<BookmarkRecord>> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| ApplicationError::OperationFailed {
                context: "read bookmark stream".to_string(),
                source: Box::new(e),
            })?;
        let raw = container::decode(&bytes, self.length_check)?;
        let tree = parse_tree(&raw)?;
        Ok(flatten(&tree, selection))
    }

    /// Wrap a raw JSON document at `json` into a container at `out`.
    #[instrument(level = "debug", skip(self))]
    pub fn pack_file(&self, json: &Path, out: &Path) -> ApplicationResult<usize> {
        let raw = self.fs.read(json).with_path_context("read JSON document", json)?;
        // Refuse to pack something that would not decode as a bookmark tree.
        parse_tree(&raw)?;
        let packed = container::encode_exact(&raw)?;
        self.fs
            .ensure_parent(out)
            .with_path_context("create parent directory", out)?;
        self.fs
            .write(out, &packed)
            .with_path_context("write bookmark store", out)?;
        Ok(packed.len())
    }

    /// Folder outline of the selected roots, for display.
    pub fn outline(&self, tree: &TreeNode, selection: &RootSelection) -> Vec<termtree::Tree<String>> {
        select_roots(tree, selection)
            .into_iter()
            .map(|root| outline_folder(root, format!("/{}", root.title)))
            .collect()
    }
}

fn outline_folder(folder: &Folder, label: String) -> termtree::Tree<String> {
    let mut tree = termtree::Tree::new(label);
    for child in &folder.children {
        match child {
            TreeNode::Folder(sub) => tree.push(outline_folder(sub, format!("{}/", sub.title))),
            TreeNode::Bookmark(bookmark) => tree.push(termtree::Tree::new(bookmark.title.clone())),
            TreeNode::Other => continue,
        };
    }
    tree
}
