//! Core types and traversal policy for arbor.
//!
//! This crate provides the directory-tree data model ([`Node`]), the
//! options/configuration records, and the shared filtering and ordering
//! policy used by the tree builder (`arbor-scan`) and the diagram
//! renderers (`arbor-render`).

mod config;
mod error;
mod node;
mod paths;
mod pattern;
mod policy;
mod size;
mod sort;

pub use config::{
    HashAlgorithm, HashEncoding, RenderConfig, RenderOptions, RenderOptionsBuilder, ScanConfig,
    ScanOptions, ScanOptionsBuilder,
};
pub use error::ScanError;
pub use node::{Node, NodeKind, NodeStat};
pub use paths::{expand_home, extension_of, name_of, resolve_root};
pub use pattern::{PatternSet, PatternSpec};
pub use policy::TraversalPolicy;
pub use size::size_label;
pub use sort::{NameComparator, NodeComparator, PostSortMode, SortMode};
