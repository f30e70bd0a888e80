//! Indented diagram renderers for arbor.
//!
//! Two independent call paths produce the same style of diagram: the
//! path-based renderers re-walk the filesystem without building a node
//! tree, while the tree-based renderers walk a tree already produced by
//! `arbor-scan`. Both apply the shared `arbor-core` traversal policy.

mod diagram;
mod path;
mod tree;

pub use path::{render_path, render_path_async};
pub use tree::{render_tree, render_tree_async};
