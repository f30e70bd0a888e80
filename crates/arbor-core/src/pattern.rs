//! Glob and regex pattern matching over relative paths.
//!
//! Patterns are tested against the entry's relative path prefixed with a
//! path separator, so a pattern sees `/src/lib.rs` for an entry at
//! `src/lib.rs` and can anchor on directory boundaries.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;

/// A caller-supplied pattern: a glob string or a prebuilt regex.
#[derive(Debug, Clone)]
pub enum PatternSpec {
    /// Glob pattern, compiled with `*` not crossing `/`.
    Glob(String),
    /// Regular expression, used as-is.
    Regex(Regex),
}

impl From<&str> for PatternSpec {
    fn from(pattern: &str) -> Self {
        PatternSpec::Glob(pattern.to_string())
    }
}

impl From<String> for PatternSpec {
    fn from(pattern: String) -> Self {
        PatternSpec::Glob(pattern)
    }
}

impl From<Regex> for PatternSpec {
    fn from(pattern: Regex) -> Self {
        PatternSpec::Regex(pattern)
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Glob(GlobMatcher),
    Regex(Regex),
}

impl Matcher {
    fn is_match(&self, anchored: &str) -> bool {
        match self {
            Matcher::Glob(glob) => glob.is_match(anchored),
            Matcher::Regex(regex) => regex.is_match(anchored),
        }
    }
}

/// An eagerly compiled set of patterns.
///
/// Globs that fail to compile are dropped with a warning; the set never
/// fails to construct.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    matchers: Vec<Matcher>,
}

impl PatternSet {
    /// Compile a list of specs into matchers.
    pub fn compile(specs: Vec<PatternSpec>) -> Self {
        let matchers = specs
            .into_iter()
            .filter_map(|spec| match spec {
                PatternSpec::Glob(pattern) => {
                    match GlobBuilder::new(&pattern).literal_separator(true).build() {
                        Ok(glob) => Some(Matcher::Glob(glob.compile_matcher())),
                        Err(error) => {
                            tracing::warn!("dropping invalid glob pattern {pattern:?}: {error}");
                            None
                        }
                    }
                }
                PatternSpec::Regex(regex) => Some(Matcher::Regex(regex)),
            })
            .collect();
        Self { matchers }
    }

    /// Check if the set has no patterns.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Test whether any pattern matches the given relative path.
    pub fn matches(&self, relative: &Path) -> bool {
        if self.matchers.is_empty() {
            return false;
        }
        let anchored = anchor(relative);
        self.matchers.iter().any(|m| m.is_match(&anchored))
    }
}

fn anchor(relative: &Path) -> String {
    format!("/{}", relative.display())
}
