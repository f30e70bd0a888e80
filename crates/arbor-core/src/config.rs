//! Scan and render options and their resolved configurations.
//!
//! Options records leave every field optional; [`ScanOptions::resolve`]
//! and [`RenderOptions::resolve`] merge them field-by-field over the
//! built-in defaults into configurations with no unset values (unlimited
//! depth stays an explicit `None`).

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::pattern::{PatternSet, PatternSpec};
use crate::policy::TraversalPolicy;
use crate::sort::{PostSortMode, SortMode};

/// Digest algorithm used for node hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
}

/// Text encoding of the finalized digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashEncoding {
    #[default]
    Hex,
    Base64,
    /// One char per digest byte (U+0000..U+00FF).
    Latin1,
}

/// Caller-facing options for tree building. Every field is optional;
/// unset fields take the defaults documented on [`ScanConfig`].
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct ScanOptions {
    /// Attach a stat snapshot to every node.
    pub stat: Option<bool>,
    /// Include symbolic links in the result.
    pub symbolic_links: Option<bool>,
    /// Follow symbolic link targets, including linked directories.
    pub follow_links: Option<bool>,
    /// Attach `size_in_bytes` to every node.
    pub size_in_bytes: Option<bool>,
    /// Attach the human-readable `size_label` to every node.
    pub size_label: Option<bool>,
    /// Compute node hashes.
    pub hash: Option<bool>,
    /// Digest algorithm for hashes.
    pub hash_algorithm: Option<HashAlgorithm>,
    /// Digest output encoding.
    pub hash_encoding: Option<HashEncoding>,
    /// Include hidden (dot-prefixed) entries.
    pub show_hidden: Option<bool>,
    /// Maximum depth below the root; `0` keeps only the root.
    pub depth: Option<u32>,
    /// Entries matching any of these patterns are excluded.
    pub exclude: Option<Vec<PatternSpec>>,
    /// When set, files are kept only if they match at least one pattern;
    /// directories are kept while any descendant matches.
    pub matches: Option<Vec<PatternSpec>>,
    /// Extension allow-list. `Some(vec![])` keeps no files at all;
    /// unset keeps every extension.
    pub extensions: Option<Vec<String>>,
    /// Attach `is_empty` to directory nodes.
    pub empty_directory: Option<bool>,
    /// Drop directories whose children were all filtered away.
    pub exclude_empty_directories: Option<bool>,
    /// Attach `descendant_count` to directory nodes.
    pub descendants: Option<bool>,
    /// Leave directories out of descendant counts.
    pub descendants_ignore_directories: Option<bool>,
    /// Sibling order applied to raw listings before recursion.
    pub sorted: Option<SortMode>,
    /// Reordering applied to built child lists after the scan.
    pub post_sorted: Option<PostSortMode>,
    /// Expand a leading `~` in the input path.
    pub home_shortcut: Option<bool>,
    /// Skip unreadable entries instead of aborting the traversal.
    pub skip_errors: Option<bool>,
}

impl ScanOptions {
    /// Create an options builder.
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Merge over the defaults into a fully-resolved configuration.
    pub fn resolve(self) -> ScanConfig {
        ScanConfig {
            stat: self.stat.unwrap_or(false),
            symbolic_links: self.symbolic_links.unwrap_or(true),
            follow_links: self.follow_links.unwrap_or(false),
            size_in_bytes: self.size_in_bytes.unwrap_or(true),
            size_label: self.size_label.unwrap_or(true),
            hash: self.hash.unwrap_or(true),
            hash_algorithm: self.hash_algorithm.unwrap_or_default(),
            hash_encoding: self.hash_encoding.unwrap_or_default(),
            show_hidden: self.show_hidden.unwrap_or(true),
            depth: self.depth,
            exclude: PatternSet::compile(self.exclude.unwrap_or_default()),
            matches: PatternSet::compile(self.matches.unwrap_or_default()),
            extensions: self.extensions,
            empty_directory: self.empty_directory.unwrap_or(false),
            exclude_empty_directories: self.exclude_empty_directories.unwrap_or(false),
            descendants: self.descendants.unwrap_or(false),
            descendants_ignore_directories: self.descendants_ignore_directories.unwrap_or(false),
            sorted: self.sorted.unwrap_or_default(),
            post_sorted: self.post_sorted.unwrap_or_default(),
            home_shortcut: self.home_shortcut.unwrap_or(false),
            skip_errors: self.skip_errors.unwrap_or(true),
        }
    }
}

/// Fully-resolved tree-building configuration.
///
/// Defaults: symlinks included but not followed, hidden entries shown,
/// byte size, size label and md5/hex hash computed, unlimited depth, no
/// patterns or extension filter, no emptiness/descendant reporting, no
/// sorting, errors tolerated by skipping.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub stat: bool,
    pub symbolic_links: bool,
    pub follow_links: bool,
    pub size_in_bytes: bool,
    pub size_label: bool,
    pub hash: bool,
    pub hash_algorithm: HashAlgorithm,
    pub hash_encoding: HashEncoding,
    pub show_hidden: bool,
    pub depth: Option<u32>,
    pub exclude: PatternSet,
    pub matches: PatternSet,
    pub extensions: Option<Vec<String>>,
    pub empty_directory: bool,
    pub exclude_empty_directories: bool,
    pub descendants: bool,
    pub descendants_ignore_directories: bool,
    pub sorted: SortMode,
    pub post_sorted: PostSortMode,
    pub home_shortcut: bool,
    pub skip_errors: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanOptions::default().resolve()
    }
}

impl TraversalPolicy for ScanConfig {
    fn max_depth(&self) -> Option<u32> {
        self.depth
    }

    fn exclude_patterns(&self) -> &PatternSet {
        &self.exclude
    }

    fn shows_hidden(&self) -> bool {
        self.show_hidden
    }

    fn includes_symlinks(&self) -> bool {
        self.symbolic_links
    }

    fn follows_links(&self) -> bool {
        self.follow_links
    }

    fn allowed_extensions(&self) -> Option<&[String]> {
        self.extensions.as_deref()
    }

    fn sort_mode(&self) -> &SortMode {
        &self.sorted
    }

    fn tolerates_errors(&self) -> bool {
        self.skip_errors
    }
}

/// Caller-facing options for diagram rendering.
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct RenderOptions {
    /// Include symbolic links in the diagram.
    pub symbolic_links: Option<bool>,
    /// Follow symbolic link targets.
    pub follow_links: Option<bool>,
    /// Include hidden (dot-prefixed) entries.
    pub show_hidden: Option<bool>,
    /// Maximum depth below the root.
    pub depth: Option<u32>,
    /// Entries matching any of these patterns are excluded.
    pub exclude: Option<Vec<PatternSpec>>,
    /// Extension allow-list, as for [`ScanOptions::extensions`].
    pub extensions: Option<Vec<String>>,
    /// Sibling order applied before recursion.
    pub sorted: Option<SortMode>,
    /// Expand a leading `~` in the input path.
    pub home_shortcut: Option<bool>,
    /// Skip unreadable entries instead of aborting.
    pub skip_errors: Option<bool>,
}

impl RenderOptions {
    /// Create an options builder.
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }

    /// Merge over the defaults into a fully-resolved configuration.
    pub fn resolve(self) -> RenderConfig {
        RenderConfig {
            symbolic_links: self.symbolic_links.unwrap_or(true),
            follow_links: self.follow_links.unwrap_or(false),
            show_hidden: self.show_hidden.unwrap_or(true),
            depth: self.depth,
            exclude: PatternSet::compile(self.exclude.unwrap_or_default()),
            extensions: self.extensions,
            sorted: self.sorted.unwrap_or_default(),
            home_shortcut: self.home_shortcut.unwrap_or(false),
            skip_errors: self.skip_errors.unwrap_or(true),
        }
    }
}

/// Fully-resolved rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub symbolic_links: bool,
    pub follow_links: bool,
    pub show_hidden: bool,
    pub depth: Option<u32>,
    pub exclude: PatternSet,
    pub extensions: Option<Vec<String>>,
    pub sorted: SortMode,
    pub home_shortcut: bool,
    pub skip_errors: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderOptions::default().resolve()
    }
}

impl TraversalPolicy for RenderConfig {
    fn max_depth(&self) -> Option<u32> {
        self.depth
    }

    fn exclude_patterns(&self) -> &PatternSet {
        &self.exclude
    }

    fn shows_hidden(&self) -> bool {
        self.show_hidden
    }

    fn includes_symlinks(&self) -> bool {
        self.symbolic_links
    }

    fn follows_links(&self) -> bool {
        self.follow_links
    }

    fn allowed_extensions(&self) -> Option<&[String]> {
        self.extensions.as_deref()
    }

    fn sort_mode(&self) -> &SortMode {
        &self.sorted
    }

    fn tolerates_errors(&self) -> bool {
        self.skip_errors
    }
}
