//! Asynchronous recursive tree builder.
//!
//! Per entry the step order is identical to the synchronous builder in
//! [`crate::scan`]; the difference is that every filesystem call and
//! observer invocation is a suspension point, and sibling subtrees are
//! launched together and joined as a batch. Results are aggregated in
//! pre-recursion sort order, not completion order, so both builders
//! produce field-identical trees.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use futures::future::join_all;
use tokio::fs;

use arbor_core::{
    Node, NodeKind, NodeStat, ScanConfig, ScanError, ScanOptions, TraversalPolicy, extension_of,
    name_of, resolve_root, size_label,
};

use crate::hasher::NodeHasher;

/// Boxed future used for async recursion and async observers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Asynchronous observer; awaited before the node is attached to its
/// parent. May mutate the node in place, as in the synchronous builder.
pub type AsyncObserver<'a> =
    Box<dyn for<'n> Fn(&'n mut Node, &'n NodeStat) -> BoxFuture<'n, ()> + Send + Sync + 'a>;

/// Asynchronous tree builder.
pub struct AsyncScanner<'a> {
    config: ScanConfig,
    on_file: Option<AsyncObserver<'a>>,
    on_dir: Option<AsyncObserver<'a>>,
}

impl<'a> AsyncScanner<'a> {
    /// Create a scanner from caller options.
    pub fn new(options: ScanOptions) -> Self {
        Self {
            config: options.resolve(),
            on_file: None,
            on_dir: None,
        }
    }

    /// Register an observer for finalized file nodes.
    pub fn on_file(
        mut self,
        observer: impl for<'n> Fn(&'n mut Node, &'n NodeStat) -> BoxFuture<'n, ()> + Send + Sync + 'a,
    ) -> Self {
        self.on_file = Some(Box::new(observer));
        self
    }

    /// Register an observer for finalized directory nodes.
    pub fn on_dir(
        mut self,
        observer: impl for<'n> Fn(&'n mut Node, &'n NodeStat) -> BoxFuture<'n, ()> + Send + Sync + 'a,
    ) -> Self {
        self.on_dir = Some(Box::new(observer));
        self
    }

    /// Build the tree rooted at `path`. See [`crate::Scanner::scan`] for
    /// the result contract.
    pub async fn scan(&self, path: impl AsRef<Path>) -> Result<Option<Node>, ScanError> {
        let input = path.as_ref();
        let root = match resolve_root(input, self.config.home_shortcut) {
            Ok(root) => root,
            Err(error) => return self.tolerate(input, error),
        };
        let mut result = self.scan_entry(&root, root.clone(), 0).await?;
        if !self.config.size_in_bytes {
            if let Some(node) = result.as_mut() {
                node.size_in_bytes = None;
            }
        }
        Ok(result)
    }

    fn scan_entry<'s>(
        &'s self,
        root: &'s Path,
        path: PathBuf,
        depth: u32,
    ) -> BoxFuture<'s, Result<Option<Node>, ScanError>> {
        Box::pin(async move {
            let config = &self.config;
            if config.exceeds_depth(depth) {
                return Ok(None);
            }

            let is_root = path == root;
            let relative = if is_root {
                PathBuf::from(".")
            } else {
                path.strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.clone())
            };
            if !is_root && config.should_exclude(&relative) {
                return Ok(None);
            }

            let name = name_of(&path);
            let metadata = match fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(error) => return self.tolerate(&path, error),
            };
            let link_metadata = match fs::symlink_metadata(&path).await {
                Ok(metadata) => metadata,
                Err(error) => return self.tolerate(&path, error),
            };
            let is_symlink = link_metadata.file_type().is_symlink();

            // The root is always visited if statable.
            if !is_root {
                if config.should_skip_hidden(&name) {
                    return Ok(None);
                }
                if config.should_skip_symlink(is_symlink) {
                    return Ok(None);
                }
            }

            let kind = if metadata.is_file() {
                NodeKind::File
            } else if metadata.is_dir() {
                NodeKind::Directory
            } else {
                // Sockets, devices and the like are never emitted.
                return Ok(None);
            };

            let hasher = if config.hash {
                let mut hasher = NodeHasher::new(config.hash_algorithm, config.hash_encoding);
                hasher.update(name.as_bytes());
                Some(hasher)
            } else {
                None
            };

            let selected = if config.follow_links {
                &metadata
            } else {
                &link_metadata
            };
            let node_stat = NodeStat::from_metadata(selected);

            let mut node = Node::new(name, path.clone(), relative.clone(), kind, is_symlink);
            if config.stat {
                node.stat = Some(node_stat.clone());
            }

            match kind {
                NodeKind::Directory => {
                    let mut children: Vec<Node> = Vec::new();
                    if config.should_descend(is_symlink) {
                        let mut names = match read_dir_names(&path).await {
                            Ok(names) => names,
                            Err(error) => return self.tolerate(&path, error),
                        };
                        config.sorted.sort_names(&mut names);
                        if config.empty_directory {
                            node.is_empty = Some(names.is_empty());
                        }
                        // Launch every child subtree, then join as a
                        // batch; the parent's accumulators are only
                        // touched after the join.
                        let pending: Vec<_> = names
                            .iter()
                            .map(|child_name| {
                                self.scan_entry(root, path.join(child_name), depth + 1)
                            })
                            .collect();
                        for result in join_all(pending).await {
                            if let Some(child) = result? {
                                children.push(child);
                            }
                        }
                        if config.exclude_empty_directories && children.is_empty() {
                            return Ok(None);
                        }
                    }
                    if !config.matches.is_empty()
                        && !is_root
                        && children.is_empty()
                        && !config.matches.matches(&relative)
                    {
                        return Ok(None);
                    }
                    if config.size_in_bytes || config.size_label {
                        let total: u64 = children
                            .iter()
                            .map(|child| child.size_in_bytes.unwrap_or(0))
                            .sum();
                        node.size_in_bytes = Some(total);
                        if config.size_label {
                            node.size_label = Some(size_label(total));
                        }
                        if !config.size_in_bytes {
                            // Children needed their byte sizes
                            // transiently for the aggregation above.
                            for child in &mut children {
                                child.size_in_bytes = None;
                            }
                        }
                    }
                    if let Some(mut hasher) = hasher {
                        for child in &children {
                            if let Some(hash) = &child.hash {
                                hasher.update(hash.as_bytes());
                            }
                        }
                        node.hash = Some(hasher.finalize());
                    }
                    if config.descendants {
                        node.descendant_count = Some(
                            children
                                .iter()
                                .map(|child| {
                                    let own = if child.is_dir()
                                        && config.descendants_ignore_directories
                                    {
                                        0
                                    } else {
                                        1
                                    };
                                    own + child.descendant_count.unwrap_or(0)
                                })
                                .sum(),
                        );
                    }
                    if !children.is_empty() {
                        // The digest above is already finalized; this
                        // only reorders the stored list.
                        config.post_sorted.sort_nodes(&mut children);
                        node.children = Some(children);
                    }
                }
                NodeKind::File => {
                    let extension = extension_of(&path);
                    if !config.allows_extension(&extension) {
                        return Ok(None);
                    }
                    if !config.matches.is_empty() && !is_root && !config.matches.matches(&relative)
                    {
                        return Ok(None);
                    }
                    node.extension = Some(extension);
                    if config.size_in_bytes || config.size_label {
                        node.size_in_bytes = Some(selected.len());
                        if config.size_label {
                            node.size_label = Some(size_label(selected.len()));
                        }
                    }
                    if let Some(mut hasher) = hasher {
                        let data = match fs::read(&path).await {
                            Ok(data) => data,
                            Err(error) => return self.tolerate(&path, error),
                        };
                        hasher.update(&data);
                        node.hash = Some(hasher.finalize());
                    }
                }
            }

            match kind {
                NodeKind::File => {
                    if let Some(observer) = &self.on_file {
                        observer(&mut node, &node_stat).await;
                    }
                }
                NodeKind::Directory => {
                    if let Some(observer) = &self.on_dir {
                        observer(&mut node, &node_stat).await;
                    }
                }
            }

            Ok(Some(node))
        })
    }

    fn tolerate(&self, path: &Path, source: io::Error) -> Result<Option<Node>, ScanError> {
        if self.config.skip_errors {
            tracing::debug!("skipping {}: {source}", path.display());
            Ok(None)
        } else {
            Err(ScanError::io(path, source))
        }
    }
}

async fn read_dir_names(path: &Path) -> io::Result<Vec<String>> {
    let mut dir = fs::read_dir(path).await?;
    let mut names = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Build a tree without observers. See [`AsyncScanner::scan`].
pub async fn scan_async(
    path: impl AsRef<Path>,
    options: ScanOptions,
) -> Result<Option<Node>, ScanError> {
    AsyncScanner::new(options).scan(path).await
}
