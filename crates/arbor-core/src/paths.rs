//! Path resolution helpers shared by the scanner and the renderers.

use std::io;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

/// Base name of a path; falls back to the whole path for roots like `/`.
pub fn name_of(path: &Path) -> CompactString {
    path.file_name()
        .map(|name| CompactString::new(name.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

/// Extension after the last dot, without the dot. Empty for files with
/// no extension and for dotfiles like `.env`.
pub fn extension_of(path: &Path) -> CompactString {
    path.extension()
        .map(|extension| CompactString::new(extension.to_string_lossy()))
        .unwrap_or_default()
}

/// Replace a leading `~` segment with the user's home directory.
///
/// Paths not starting with `~`, and systems where no home directory can
/// be determined, leave the input unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Resolve an input path to an absolute path, optionally expanding a
/// leading `~` first. Symlinks are not resolved, so a symlinked root is
/// still observed as a symlink.
pub fn resolve_root(path: &Path, home_shortcut: bool) -> io::Result<PathBuf> {
    let expanded = if home_shortcut {
        expand_home(path)
    } else {
        path.to_path_buf()
    };
    std::path::absolute(expanded)
}
