//! Directory tree node types.

use std::path::PathBuf;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Kind of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory.
    Directory,
    /// Regular file.
    File,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// Serializable stat snapshot of a filesystem entry.
///
/// Whether this reflects the entry itself or its symlink target is decided
/// by the `follow_links` configuration at scan time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStat {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: Option<SystemTime>,
    /// Last access time.
    pub accessed: Option<SystemTime>,
    /// Creation time (platform-dependent).
    pub created: Option<SystemTime>,
    /// Unix permission bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
    /// Inode number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inode: Option<u64>,
    /// Device ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<u64>,
    /// Number of hard links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlink: Option<u64>,
}

impl NodeStat {
    /// Build a snapshot from filesystem metadata.
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        Self {
            size: metadata.len(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
            created: metadata.created().ok(),
            mode: get_mode(metadata),
            inode: get_ino(metadata),
            device: get_dev(metadata),
            nlink: get_nlink(metadata),
        }
    }
}

#[cfg(unix)]
fn get_mode(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.mode())
}

#[cfg(not(unix))]
fn get_mode(_metadata: &std::fs::Metadata) -> Option<u32> {
    None
}

#[cfg(unix)]
fn get_ino(metadata: &std::fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.ino())
}

#[cfg(not(unix))]
fn get_ino(_metadata: &std::fs::Metadata) -> Option<u64> {
    None
}

#[cfg(unix)]
fn get_dev(metadata: &std::fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.dev())
}

#[cfg(not(unix))]
fn get_dev(_metadata: &std::fs::Metadata) -> Option<u64> {
    None
}

#[cfg(unix)]
fn get_nlink(metadata: &std::fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.nlink())
}

#[cfg(not(unix))]
fn get_nlink(_metadata: &std::fs::Metadata) -> Option<u64> {
    None
}

/// A single entry in a scanned directory tree.
///
/// Optional fields are present only when the corresponding scan option
/// requested them; absent fields are omitted from serialized output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Entry name (not full path).
    pub name: CompactString,

    /// Absolute path of the entry.
    pub path: PathBuf,

    /// Path relative to the scan root. The root node's value is `"."`.
    pub relative_path: PathBuf,

    /// Directory or file.
    pub kind: NodeKind,

    /// Whether the entry itself is a symbolic link.
    pub is_symlink: bool,

    /// Size in bytes. For directories this is the sum over included
    /// children, not the on-disk directory size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<u64>,

    /// Human-readable size, e.g. "2.5 KB".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,

    /// Encoded digest over the entry's name and content (files) or over
    /// the name and the children's digests (directories).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// File extension without the dot; empty string if none. Files only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<CompactString>,

    /// Whether the raw directory listing was empty. Directories only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,

    /// Recursive count of kept descendants. Directories only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descendant_count: Option<u64>,

    /// Stat snapshot, attached when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<NodeStat>,

    /// Kept children, in traversal (or post-sort) order. Directories
    /// only, present iff at least one child was kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a bare node; computed fields start out absent.
    pub fn new(
        name: impl Into<CompactString>,
        path: PathBuf,
        relative_path: PathBuf,
        kind: NodeKind,
        is_symlink: bool,
    ) -> Self {
        Self {
            name: name.into(),
            path,
            relative_path,
            kind,
            is_symlink,
            size_in_bytes: None,
            size_label: None,
            hash: None,
            extension: None,
            is_empty: None,
            descendant_count: None,
            stat: None,
            children: None,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Number of direct kept children.
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_node(name: &str) -> Node {
        Node::new(
            name,
            PathBuf::from("/root").join(name),
            PathBuf::from(name),
            NodeKind::File,
            false,
        )
    }

    #[test]
    fn test_node_kind_discrimination() {
        assert!(NodeKind::Directory.is_dir());
        assert!(!NodeKind::Directory.is_file());
        assert!(NodeKind::File.is_file());
        assert!(!NodeKind::File.is_dir());
    }

    #[test]
    fn test_new_node_has_no_computed_fields() {
        let node = file_node("a.txt");
        assert!(node.is_file());
        assert!(node.size_in_bytes.is_none());
        assert!(node.hash.is_none());
        assert!(node.children.is_none());
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let node = file_node("a.txt");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "file");
        assert_eq!(json["name"], "a.txt");
        assert!(json.get("size_in_bytes").is_none());
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut node = Node::new(
            "root",
            PathBuf::from("/root"),
            PathBuf::from("."),
            NodeKind::Directory,
            false,
        );
        node.size_in_bytes = Some(5);
        node.children = Some(vec![file_node("a.txt")]);

        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "root");
        assert_eq!(back.size_in_bytes, Some(5));
        assert_eq!(back.child_count(), 1);
    }
}
