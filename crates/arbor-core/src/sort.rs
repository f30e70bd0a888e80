//! Sibling ordering modes.
//!
//! [`SortMode`] orders raw path segments before recursion; [`PostSortMode`]
//! reorders already-built child nodes afterwards. Reverse modes sort
//! ascending and then reverse the result.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::node::Node;

/// Caller-supplied comparator over path strings.
pub type NameComparator = Arc<dyn Fn(&str, &str) -> Ordering + Send + Sync>;

/// Caller-supplied comparator over built nodes.
pub type NodeComparator = Arc<dyn Fn(&Node, &Node) -> Ordering + Send + Sync>;

/// How sibling entries are ordered before recursion.
#[derive(Clone, Default)]
pub enum SortMode {
    /// Keep the order the OS returned.
    #[default]
    Unsorted,
    /// Lexicographic ascending.
    Alphabetical,
    /// Lexicographic descending.
    AlphabeticalReverse,
    /// Case-insensitive ascending.
    AlphabeticalInsensitive,
    /// Case-insensitive descending.
    AlphabeticalInsensitiveReverse,
    /// Custom comparator over path strings.
    Custom(NameComparator),
}

impl SortMode {
    /// Sort items by a string key extracted from each.
    pub fn sort_by_str_key<T, F>(&self, items: &mut [T], key: F)
    where
        F: Fn(&T) -> &str,
    {
        match self {
            SortMode::Unsorted => {}
            SortMode::Alphabetical => items.sort_by(|a, b| key(a).cmp(key(b))),
            SortMode::AlphabeticalReverse => {
                items.sort_by(|a, b| key(a).cmp(key(b)));
                items.reverse();
            }
            SortMode::AlphabeticalInsensitive => {
                items.sort_by(|a, b| insensitive(key(a), key(b)));
            }
            SortMode::AlphabeticalInsensitiveReverse => {
                items.sort_by(|a, b| insensitive(key(a), key(b)));
                items.reverse();
            }
            SortMode::Custom(comparator) => items.sort_by(|a, b| comparator(key(a), key(b))),
        }
    }

    /// Sort a list of path segments.
    pub fn sort_names(&self, names: &mut [String]) {
        self.sort_by_str_key(names, |name| name.as_str());
    }
}

impl fmt::Debug for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Unsorted => f.write_str("Unsorted"),
            SortMode::Alphabetical => f.write_str("Alphabetical"),
            SortMode::AlphabeticalReverse => f.write_str("AlphabeticalReverse"),
            SortMode::AlphabeticalInsensitive => f.write_str("AlphabeticalInsensitive"),
            SortMode::AlphabeticalInsensitiveReverse => {
                f.write_str("AlphabeticalInsensitiveReverse")
            }
            SortMode::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How a directory's built child nodes are reordered after the scan.
#[derive(Clone, Default)]
pub enum PostSortMode {
    /// Keep traversal order.
    #[default]
    Unsorted,
    /// Lexicographic ascending on node names.
    Alphabetical,
    /// Lexicographic descending on node names.
    AlphabeticalReverse,
    /// Case-insensitive ascending on node names.
    AlphabeticalInsensitive,
    /// Case-insensitive descending on node names.
    AlphabeticalInsensitiveReverse,
    /// Directories before files; ties keep traversal order.
    FoldersFirst,
    /// Files before directories; ties keep traversal order.
    FilesFirst,
    /// Custom comparator over nodes.
    Custom(NodeComparator),
}

impl PostSortMode {
    /// Reorder a built child list in place.
    pub fn sort_nodes(&self, nodes: &mut [Node]) {
        match self {
            PostSortMode::Unsorted => {}
            PostSortMode::Alphabetical => nodes.sort_by(|a, b| a.name.cmp(&b.name)),
            PostSortMode::AlphabeticalReverse => {
                nodes.sort_by(|a, b| a.name.cmp(&b.name));
                nodes.reverse();
            }
            PostSortMode::AlphabeticalInsensitive => {
                nodes.sort_by(|a, b| insensitive(&a.name, &b.name));
            }
            PostSortMode::AlphabeticalInsensitiveReverse => {
                nodes.sort_by(|a, b| insensitive(&a.name, &b.name));
                nodes.reverse();
            }
            PostSortMode::FoldersFirst => {
                nodes.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Ordering::Equal,
                });
            }
            PostSortMode::FilesFirst => {
                nodes.sort_by(|a, b| match (a.is_file(), b.is_file()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Ordering::Equal,
                });
            }
            PostSortMode::Custom(comparator) => nodes.sort_by(|a, b| comparator(a, b)),
        }
    }
}

impl fmt::Debug for PostSortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostSortMode::Unsorted => f.write_str("Unsorted"),
            PostSortMode::Alphabetical => f.write_str("Alphabetical"),
            PostSortMode::AlphabeticalReverse => f.write_str("AlphabeticalReverse"),
            PostSortMode::AlphabeticalInsensitive => f.write_str("AlphabeticalInsensitive"),
            PostSortMode::AlphabeticalInsensitiveReverse => {
                f.write_str("AlphabeticalInsensitiveReverse")
            }
            PostSortMode::FoldersFirst => f.write_str("FoldersFirst"),
            PostSortMode::FilesFirst => f.write_str("FilesFirst"),
            PostSortMode::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
