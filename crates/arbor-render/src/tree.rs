//! Diagram rendering over an already-built node tree.
//!
//! Applies the same inclusion and ordering policy as the path-based
//! renderer, but reads everything from [`Node`] fields instead of fresh
//! stats; it never touches the filesystem and never fails.

use arbor_core::{Node, RenderConfig, RenderOptions, TraversalPolicy};

use crate::diagram::{Rendered, write_entries};

/// Render a built tree as an indented diagram.
pub fn render_tree(node: &Node, options: RenderOptions) -> String {
    let config = options.resolve();
    let mut out = String::from(node.name.as_str());
    if let Some(children) = &node.children {
        let entries = collect_nodes(children, &config, 1);
        write_entries(&mut out, &entries, "\n ");
    }
    out
}

/// Asynchronous counterpart of [`render_tree`]. The walk reads only
/// in-memory nodes, so this suspends nowhere; it exists for parity with
/// the other entry points.
pub async fn render_tree_async(node: &Node, options: RenderOptions) -> String {
    render_tree(node, options)
}

fn collect_nodes(children: &[Node], config: &RenderConfig, depth: u32) -> Vec<Rendered> {
    let mut ordered: Vec<&Node> = children.iter().collect();
    config
        .sorted
        .sort_by_str_key(&mut ordered, |node| {
            node.relative_path.to_str().unwrap_or("")
        });
    ordered
        .into_iter()
        .filter(|node| !skip_node(node, config, depth))
        .map(|node| {
            let children = match &node.children {
                Some(children) if config.should_descend(node.is_symlink) => {
                    collect_nodes(children, config, depth + 1)
                }
                _ => Vec::new(),
            };
            Rendered {
                name: node.name.clone(),
                is_symlink: node.is_symlink,
                is_dir: node.is_dir(),
                children,
            }
        })
        .collect()
}

fn skip_node(node: &Node, config: &RenderConfig, depth: u32) -> bool {
    config.should_skip_symlink(node.is_symlink)
        || config.should_skip_hidden(&node.name)
        || (node.is_file() && !config.allows_extension(node.extension.as_deref().unwrap_or("")))
        || config.should_exclude(&node.relative_path)
        || config.exceeds_depth(depth)
}
