//! Bookmark tree nodes as stored in the Firefox JSON document.

use serde::Deserialize;
use tracing::trace;

pub const TYPE_PLACE: &str = "text/x-moz-place";
pub const TYPE_CONTAINER: &str = "text/x-moz-place-container";
pub const TYPE_SEPARATOR: &str = "text/x-moz-place-separator";

const TYPE_CODE_PLACE: u8 = 1;
const TYPE_CODE_CONTAINER: u8 = 2;
const TYPE_CODE_SEPARATOR: u8 = 3;

/// Node exactly as serialized by Firefox; only the fields we read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub guid: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub type_code: Option<u8>,
    pub root: Option<String>,
    pub uri: Option<String>,
    pub children: Option<Vec<RawNode>>,
}

/// A folder (container) with its children in stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub title: String,
    /// Firefox root marker, e.g. `bookmarksMenuFolder`
    pub root: Option<String>,
    pub children: Vec<TreeNode>,
}

/// A bookmark leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Folder(Folder),
    Bookmark(Bookmark),
    /// Separators, unknown types and leaves without a URI
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Place,
    Container,
    Separator,
    Unknown,
}

impl RawNode {
    /// The explicit type marker wins; without one, the populated fields decide.
    fn kind(&self) -> Kind {
        match (self.kind.as_deref(), self.type_code) {
            (Some(TYPE_PLACE), _) | (None, Some(TYPE_CODE_PLACE)) => Kind::Place,
            (Some(TYPE_CONTAINER), _) | (None, Some(TYPE_CODE_CONTAINER)) => Kind::Container,
            (Some(TYPE_SEPARATOR), _) | (None, Some(TYPE_CODE_SEPARATOR)) => Kind::Separator,
            (None, None) if self.children.is_some() => Kind::Container,
            (None, None) if self.uri.is_some() => Kind::Place,
            _ => Kind::Unknown,
        }
    }
}

impl From<RawNode> for TreeNode {
    fn from(raw: RawNode) -> Self {
        match raw.kind() {
            Kind::Container => TreeNode::Folder(Folder {
                title: raw.title.unwrap_or_default(),
                root: raw.root,
                children: raw
                    .children
                    .unwrap_or_default()
                    .into_iter()
                    .map(TreeNode::from)
                    .collect(),
            }),
            Kind::Place => match raw.uri {
                Some(uri) => TreeNode::Bookmark(Bookmark {
                    title: raw.title.unwrap_or_default(),
                    uri,
                }),
                None => {
                    trace!("skipping leaf without uri: guid={:?}", raw.guid);
                    TreeNode::Other
                }
            },
            Kind::Separator | Kind::Unknown => TreeNode::Other,
        }
    }
}

impl TreeNode {
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            TreeNode::Folder(folder) => Some(folder),
            _ => None,
        }
    }
}
