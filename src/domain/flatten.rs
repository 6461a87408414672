//! Tree-to-list flattening of the bookmark document.

use tracing::{debug, warn};

use crate::domain::entities::{BookmarkRecord, RootSelection};
use crate::domain::error::FormatError;
use crate::domain::node::{Folder, RawNode, TreeNode};

/// Parse the decompressed JSON document into a tree.
pub fn parse_tree(raw: &[u8]) -> Result<TreeNode, FormatError> {
    let node: RawNode = serde_json::from_slice(raw)?;
    Ok(TreeNode::from(node))
}

/// Parse `raw` and flatten the selected roots.
pub fn flatten_json(raw: &[u8], selection: &RootSelection) -> Result<Vec<BookmarkRecord>, FormatError> {
    let tree = parse_tree(raw)?;
    Ok(flatten(&tree, selection))
}

/// Containers where the walk starts, in stored order.
///
/// The document node itself if it matches, otherwise its matching direct
/// child folders.
pub fn select_roots<'a>(tree: &'a TreeNode, selection: &RootSelection) -> Vec<&'a Folder> {
    let Some(top) = tree.as_folder() else {
        return Vec::new();
    };
    if selection.matches(&top.title, top.root.as_deref()) && !top.title.is_empty() {
        return vec![top];
    }
    top.children
        .iter()
        .filter_map(TreeNode::as_folder)
        .filter(|folder| selection.matches(&folder.title, folder.root.as_deref()))
        .collect()
}

/// Flatten the selected roots of `tree` into records, depth-first pre-order.
pub fn flatten(tree: &TreeNode, selection: &RootSelection) -> Vec<BookmarkRecord> {
    let roots = select_roots(tree, selection);
    if roots.is_empty() {
        warn!("no bookmark root matches {:?}", selection.names());
        return Vec::new();
    }

    let mut records = Vec::new();
    for root in roots {
        let path = format!("/{}", root.title);
        debug!("flatten: root={}", path);
        walk(&root.children, &path, &mut records);
    }
    debug!("flatten: {} records", records.len());
    records
}

fn walk(children: &[TreeNode], path: &str, records: &mut Vec<BookmarkRecord>) {
    for child in children {
        match child {
            TreeNode::Folder(folder) => {
                walk(&folder.children, &format!("{}/{}", path, folder.title), records)
            }
            TreeNode::Bookmark(bookmark) => {
                records.push(BookmarkRecord::new(path, &bookmark.title, &bookmark.uri))
            }
            TreeNode::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "title": "", "root": "placesRoot", "type": "text/x-moz-place-container",
        "children": [
            {"title": "root", "root": "bookmarksMenuFolder", "type": "text/x-moz-place-container",
             "children": [
                {"title": "F1", "type": "text/x-moz-place-container",
                 "children": [{"title": "one", "type": "text/x-moz-place", "uri": "https://one.example/"}]},
                {"type": "text/x-moz-place-separator"},
                {"title": "F2", "type": "text/x-moz-place-container",
                 "children": [{"title": "two", "type": "text/x-moz-place", "uri": "https://two.example/"}]}
             ]},
            {"title": "toolbar", "root": "toolbarFolder", "type": "text/x-moz-place-container",
             "children": [{"title": "tb", "type": "text/x-moz-place", "uri": "https://tb.example/"}]}
        ]
    }"#;

    #[test]
    fn given_sibling_folders_when_flattening_then_stored_order_is_kept() {
        let records = flatten_json(DOC.as_bytes(), &RootSelection::new(["root"])).unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
        assert_eq!(records[0].folder, "/root/F1");
        assert_eq!(records[1].folder, "/root/F2");
    }

    #[test]
    fn given_nested_leaf_when_flattening_then_path_excludes_leaf_title() {
        let doc = r#"{"title":"","children":[{"title":"root","children":[
            {"title":"A","children":[{"title":"B","children":[
                {"title":"leaf","uri":"https://leaf.example/x"}]}]}]}]}"#;
        let records = flatten_json(doc.as_bytes(), &RootSelection::new(["root"])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].folder, "/root/A/B");
        assert_eq!(records[0].title, "leaf");
        assert_eq!(records[0].domain, "leaf.example");
    }

    #[test]
    fn given_root_marker_when_selecting_then_matches_like_title() {
        let records =
            flatten_json(DOC.as_bytes(), &RootSelection::new(["toolbarFolder"])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].folder, "/toolbar");
    }

    #[test]
    fn given_all_selection_when_flattening_then_every_root_in_order() {
        let records = flatten_json(DOC.as_bytes(), &RootSelection::all()).unwrap();
        let folders: Vec<_> = records.iter().map(|r| r.folder.as_str()).collect();
        assert_eq!(folders, vec!["/root/F1", "/root/F2", "/toolbar"]);
    }

    #[test]
    fn given_unknown_root_when_flattening_then_empty() {
        let records = flatten_json(DOC.as_bytes(), &RootSelection::new(["nope"])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn given_document_node_matching_when_flattening_then_starts_at_document() {
        let doc = r#"{"title":"Bookmark Menu","children":[{"title":"g","uri":"https://g.example/"}]}"#;
        let records = flatten_json(doc.as_bytes(), &RootSelection::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].folder, "/Bookmark Menu");
    }

    #[test]
    fn given_malformed_json_when_flattening_then_invalid_json() {
        let err = flatten_json(b"{\"title\": ", &RootSelection::default()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidJson(_)));
    }

    #[test]
    fn given_leaf_with_bad_uri_when_flattening_then_record_kept_with_empty_domain() {
        let doc = r#"{"title":"","children":[{"title":"root","children":[
            {"title":"odd","uri":"not a uri"},
            {"title":"no uri","type":"text/x-moz-place"}]}]}"#;
        let records = flatten_json(doc.as_bytes(), &RootSelection::new(["root"])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "odd");
        assert_eq!(records[0].domain, "");
    }
}
