//! Diagram rendering by walking the filesystem directly.
//!
//! This call path never builds a [`arbor_core::Node`] tree; entries are
//! filtered and statted on the fly, and exclude patterns are tested
//! before a candidate child is statted at all.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use futures::future::join_all;

use arbor_core::{
    RenderConfig, RenderOptions, ScanError, TraversalPolicy, extension_of, name_of, resolve_root,
};

use crate::diagram::{Rendered, write_entries};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Render the subtree at `path` as an indented diagram.
///
/// `Ok(None)` means the root was unreadable under error tolerance;
/// unreadable descendants are simply omitted from the diagram.
pub fn render_path(
    path: impl AsRef<Path>,
    options: RenderOptions,
) -> Result<Option<String>, ScanError> {
    PathRenderer {
        config: options.resolve(),
    }
    .render(path.as_ref())
}

/// Asynchronous counterpart of [`render_path`]; sibling subtrees are
/// walked concurrently and joined in sort order.
pub async fn render_path_async(
    path: impl AsRef<Path>,
    options: RenderOptions,
) -> Result<Option<String>, ScanError> {
    AsyncPathRenderer {
        config: options.resolve(),
    }
    .render(path.as_ref())
    .await
}

struct PathRenderer {
    config: RenderConfig,
}

impl PathRenderer {
    fn render(&self, input: &Path) -> Result<Option<String>, ScanError> {
        let root = match resolve_root(input, self.config.home_shortcut) {
            Ok(root) => root,
            Err(error) => return self.tolerate(input, error),
        };
        let metadata = match std::fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(error) => return self.tolerate(&root, error),
        };
        let link_metadata = match std::fs::symlink_metadata(&root) {
            Ok(metadata) => metadata,
            Err(error) => return self.tolerate(&root, error),
        };
        let is_symlink = link_metadata.file_type().is_symlink();

        let mut out = String::new();
        out.push_str(&name_of(&root));
        if self.config.should_descend(is_symlink) && metadata.is_dir() {
            let mut names = match read_dir_names(&root) {
                Ok(names) => names,
                Err(error) => return self.tolerate(&root, error),
            };
            self.config.sorted.sort_names(&mut names);
            let entries = self.collect_children(&root, &root, names, 1)?;
            write_entries(&mut out, &entries, "\n ");
        }
        Ok(Some(out))
    }

    fn collect_children(
        &self,
        root: &Path,
        parent: &Path,
        names: Vec<String>,
        depth: u32,
    ) -> Result<Vec<Rendered>, ScanError> {
        let mut entries = Vec::new();
        if self.config.exceeds_depth(depth) {
            return Ok(entries);
        }
        for name in names {
            if let Some(entry) = self.build_entry(root, parent.join(&name), depth)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn build_entry(
        &self,
        root: &Path,
        path: PathBuf,
        depth: u32,
    ) -> Result<Option<Rendered>, ScanError> {
        let config = &self.config;
        let relative = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        // Excluded candidates are never statted.
        if config.should_exclude(&relative) {
            return Ok(None);
        }

        let name = name_of(&path);
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => return self.tolerate(&path, error),
        };
        let link_metadata = match std::fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => return self.tolerate(&path, error),
        };
        let is_symlink = link_metadata.file_type().is_symlink();

        if config.should_skip_hidden(&name) {
            return Ok(None);
        }
        if config.should_skip_symlink(is_symlink) {
            return Ok(None);
        }
        let is_dir = metadata.is_dir();
        if !is_dir && !metadata.is_file() {
            return Ok(None);
        }
        if metadata.is_file() && !config.allows_extension(&extension_of(&path)) {
            return Ok(None);
        }

        let children = if is_dir && config.should_descend(is_symlink) {
            let mut names = match read_dir_names(&path) {
                Ok(names) => names,
                // An unlistable directory drops out of the diagram
                // entirely, line included.
                Err(error) => return self.tolerate(&path, error),
            };
            config.sorted.sort_names(&mut names);
            self.collect_children(root, &path, names, depth + 1)?
        } else {
            Vec::new()
        };

        Ok(Some(Rendered {
            name,
            is_symlink,
            is_dir,
            children,
        }))
    }

    fn tolerate<T>(&self, path: &Path, source: io::Error) -> Result<Option<T>, ScanError> {
        if self.config.skip_errors {
            tracing::debug!("skipping {}: {source}", path.display());
            Ok(None)
        } else {
            Err(ScanError::io(path, source))
        }
    }
}

struct AsyncPathRenderer {
    config: RenderConfig,
}

impl AsyncPathRenderer {
    async fn render(&self, input: &Path) -> Result<Option<String>, ScanError> {
        let root = match resolve_root(input, self.config.home_shortcut) {
            Ok(root) => root,
            Err(error) => return self.tolerate(input, error),
        };
        let metadata = match tokio::fs::metadata(&root).await {
            Ok(metadata) => metadata,
            Err(error) => return self.tolerate(&root, error),
        };
        let link_metadata = match tokio::fs::symlink_metadata(&root).await {
            Ok(metadata) => metadata,
            Err(error) => return self.tolerate(&root, error),
        };
        let is_symlink = link_metadata.file_type().is_symlink();

        let mut out = String::new();
        out.push_str(&name_of(&root));
        if self.config.should_descend(is_symlink) && metadata.is_dir() {
            let mut names = match read_dir_names_async(&root).await {
                Ok(names) => names,
                Err(error) => return self.tolerate(&root, error),
            };
            self.config.sorted.sort_names(&mut names);
            let entries = self.collect_children(&root, root.clone(), names, 1).await?;
            write_entries(&mut out, &entries, "\n ");
        }
        Ok(Some(out))
    }

    fn collect_children<'s>(
        &'s self,
        root: &'s Path,
        parent: PathBuf,
        names: Vec<String>,
        depth: u32,
    ) -> BoxFuture<'s, Result<Vec<Rendered>, ScanError>> {
        Box::pin(async move {
            let mut entries = Vec::new();
            if self.config.exceeds_depth(depth) {
                return Ok(entries);
            }
            // Launch every sibling, then join as a batch in sort order.
            let pending: Vec<_> = names
                .iter()
                .map(|name| self.build_entry(root, parent.join(name), depth))
                .collect();
            for result in join_all(pending).await {
                if let Some(entry) = result? {
                    entries.push(entry);
                }
            }
            Ok(entries)
        })
    }

    fn build_entry<'s>(
        &'s self,
        root: &'s Path,
        path: PathBuf,
        depth: u32,
    ) -> BoxFuture<'s, Result<Option<Rendered>, ScanError>> {
        Box::pin(async move {
            let config = &self.config;
            let relative = path
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            // Excluded candidates are never statted.
            if config.should_exclude(&relative) {
                return Ok(None);
            }

            let name = name_of(&path);
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(error) => return self.tolerate(&path, error),
            };
            let link_metadata = match tokio::fs::symlink_metadata(&path).await {
                Ok(metadata) => metadata,
                Err(error) => return self.tolerate(&path, error),
            };
            let is_symlink = link_metadata.file_type().is_symlink();

            if config.should_skip_hidden(&name) {
                return Ok(None);
            }
            if config.should_skip_symlink(is_symlink) {
                return Ok(None);
            }
            let is_dir = metadata.is_dir();
            if !is_dir && !metadata.is_file() {
                return Ok(None);
            }
            if metadata.is_file() && !config.allows_extension(&extension_of(&path)) {
                return Ok(None);
            }

            let children = if is_dir && config.should_descend(is_symlink) {
                let mut names = match read_dir_names_async(&path).await {
                    Ok(names) => names,
                    // An unlistable directory drops out of the diagram
                    // entirely, line included.
                    Err(error) => return self.tolerate(&path, error),
                };
                config.sorted.sort_names(&mut names);
                self.collect_children(root, path.clone(), names, depth + 1)
                    .await?
            } else {
                Vec::new()
            };

            Ok(Some(Rendered {
                name,
                is_symlink,
                is_dir,
                children,
            }))
        })
    }

    fn tolerate<T>(&self, path: &Path, source: io::Error) -> Result<Option<T>, ScanError> {
        if self.config.skip_errors {
            tracing::debug!("skipping {}: {source}", path.display());
            Ok(None)
        } else {
            Err(ScanError::io(path, source))
        }
    }
}

fn read_dir_names(path: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

async fn read_dir_names_async(path: &Path) -> io::Result<Vec<String>> {
    let mut dir = tokio::fs::read_dir(path).await?;
    let mut names = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}
