//! Repository facts abstraction layer
//!
//! This module provides a trait-based abstraction over the raw repository
//! facts the resolver consumes, allowing for multiple implementations
//! including real Git repositories and mock implementations for testing.
//!
//! The primary abstraction is the [FactsProvider] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2FactsProvider]: A real implementation using the `git2` crate
//! - [mock::MockFactsProvider]: A mock implementation for testing
//!
//! Most code should depend on the [FactsProvider] trait rather than
//! concrete implementations to enable easy testing and flexibility.

pub mod mock;
pub mod repository;

pub use mock::MockFactsProvider;
pub use repository::Git2FactsProvider;

use crate::error::Result;
use std::path::Path;

/// Commit hash reported for a repository without any commit
pub const NO_COMMIT: &str = "0000000000000000000000000000000000000000";

/// Raw facts about one repository's current state.
///
/// Computed once per repository root per session, then cached by the
/// resolver. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFacts {
    /// Full commit hash of HEAD, or [NO_COMMIT] before the first commit
    pub commit: String,
    /// Current branch name, `None` when HEAD is detached
    pub branch: Option<String>,
    /// Names of tags pointing at the current commit
    pub tags_at_head: Vec<String>,
    /// Chronologically most recent tag across the whole repository
    pub last_tag: Option<String>,
    /// Describe string relative to `last_tag`, when available
    pub last_tag_describe: Option<String>,
}

/// Source of raw repository facts.
///
/// All methods are ordinary synchronous calls. Implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::GitVersioningError] variants.
pub trait FactsProvider: Send + Sync {
    /// Full 40-hex-char hash of HEAD, or [NO_COMMIT] when the
    /// repository has no commits yet
    fn head_commit(&self, root: &Path) -> Result<String>;

    /// Current branch name, or `None` when HEAD is detached
    fn head_branch(&self, root: &Path) -> Result<Option<String>>;

    /// Tag names whose (possibly peeled) target equals `commit`
    fn tags_at(&self, root: &Path, commit: &str) -> Result<Vec<String>>;

    /// The tag with the latest tagger timestamp across the repository,
    /// independent of HEAD
    fn most_recent_tag(&self, root: &Path) -> Result<Option<String>>;

    /// Describe string `<base>-<distance>-g<abbrev>` relative to the
    /// given base ref name, or `None` if no such ref is reachable
    fn describe(&self, root: &Path, base: &str) -> Result<Option<String>>;

    /// Whether the working tree has no uncommitted changes. Only used
    /// for an advisory warning, never gates resolution.
    fn working_tree_clean(&self, root: &Path) -> Result<bool>;
}

/// Shared providers delegate, so a caller can keep a handle on the
/// provider it hands to the resolver
impl<P: FactsProvider + ?Sized> FactsProvider for std::sync::Arc<P> {
    fn head_commit(&self, root: &Path) -> Result<String> {
        (**self).head_commit(root)
    }

    fn head_branch(&self, root: &Path) -> Result<Option<String>> {
        (**self).head_branch(root)
    }

    fn tags_at(&self, root: &Path, commit: &str) -> Result<Vec<String>> {
        (**self).tags_at(root, commit)
    }

    fn most_recent_tag(&self, root: &Path) -> Result<Option<String>> {
        (**self).most_recent_tag(root)
    }

    fn describe(&self, root: &Path, base: &str) -> Result<Option<String>> {
        (**self).describe(root, base)
    }

    fn working_tree_clean(&self, root: &Path) -> Result<bool> {
        (**self).working_tree_clean(root)
    }
}
