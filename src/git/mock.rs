use crate::error::{GitVersioningError, Result};
use crate::git::{FactsProvider, NO_COMMIT};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock facts provider for testing without actual git operations.
///
/// Serves the same configured facts for any repository root and counts
/// queries so tests can assert the resolver's at-most-once caching.
pub struct MockFactsProvider {
    commit: String,
    branch: Option<String>,
    tags_at_head: Vec<String>,
    last_tag: Option<String>,
    describes: HashMap<String, String>,
    scoped_describes: HashMap<(PathBuf, String), String>,
    clean: bool,
    status_error: bool,
    head_commit_queries: AtomicUsize,
}

impl MockFactsProvider {
    /// Create a mock for an empty repository (no commits, no refs)
    pub fn new() -> Self {
        MockFactsProvider {
            commit: NO_COMMIT.to_string(),
            branch: None,
            tags_at_head: Vec::new(),
            last_tag: None,
            describes: HashMap::new(),
            scoped_describes: HashMap::new(),
            clean: true,
            status_error: false,
            head_commit_queries: AtomicUsize::new(0),
        }
    }

    pub fn set_commit(&mut self, commit: impl Into<String>) {
        self.commit = commit.into();
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = Some(branch.into());
    }

    pub fn detach_head(&mut self) {
        self.branch = None;
    }

    /// Add a tag pointing at the mock HEAD commit
    pub fn add_tag_at_head(&mut self, name: impl Into<String>) {
        self.tags_at_head.push(name.into());
    }

    pub fn set_last_tag(&mut self, name: impl Into<String>) {
        self.last_tag = Some(name.into());
    }

    /// Register the describe string returned for a base ref name
    pub fn add_describe(&mut self, base: impl Into<String>, describe: impl Into<String>) {
        self.describes.insert(base.into(), describe.into());
    }

    /// Register a describe string only served for the given root,
    /// taking precedence over root-agnostic registrations
    pub fn add_describe_at(
        &mut self,
        root: impl Into<PathBuf>,
        base: impl Into<String>,
        describe: impl Into<String>,
    ) {
        self.scoped_describes
            .insert((root.into(), base.into()), describe.into());
    }

    pub fn set_dirty(&mut self) {
        self.clean = false;
    }

    /// Make the working-tree status query fail
    pub fn fail_status_check(&mut self) {
        self.status_error = true;
    }

    /// Number of times `head_commit` was queried
    pub fn head_commit_queries(&self) -> usize {
        self.head_commit_queries.load(Ordering::Relaxed)
    }
}

impl Default for MockFactsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FactsProvider for MockFactsProvider {
    fn head_commit(&self, _root: &Path) -> Result<String> {
        self.head_commit_queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.commit.clone())
    }

    fn head_branch(&self, _root: &Path) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn tags_at(&self, _root: &Path, commit: &str) -> Result<Vec<String>> {
        if commit == self.commit {
            Ok(self.tags_at_head.clone())
        } else {
            Ok(Vec::new())
        }
    }

    fn most_recent_tag(&self, _root: &Path) -> Result<Option<String>> {
        Ok(self.last_tag.clone())
    }

    fn describe(&self, root: &Path, base: &str) -> Result<Option<String>> {
        if let Some(hit) = self
            .scoped_describes
            .get(&(root.to_path_buf(), base.to_string()))
        {
            return Ok(Some(hit.clone()));
        }
        Ok(self.describes.get(base).cloned())
    }

    fn working_tree_clean(&self, _root: &Path) -> Result<bool> {
        if self.status_error {
            return Err(GitVersioningError::repository(
                "status query failed".to_string(),
            ));
        }
        Ok(self.clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_empty_repository() {
        let mock = MockFactsProvider::new();
        let root = Path::new(".");

        assert_eq!(mock.head_commit(root).unwrap(), NO_COMMIT);
        assert_eq!(mock.head_branch(root).unwrap(), None);
        assert!(mock.tags_at(root, NO_COMMIT).unwrap().is_empty());
        assert_eq!(mock.most_recent_tag(root).unwrap(), None);
        assert!(mock.working_tree_clean(root).unwrap());
    }

    #[test]
    fn test_mock_configured_facts() {
        let mut mock = MockFactsProvider::new();
        mock.set_commit("abcdef1234567890abcdef1234567890abcdef12");
        mock.set_branch("main");
        mock.add_tag_at_head("v1.0.0");
        mock.set_last_tag("v1.0.0");
        mock.add_describe("v1.0.0", "v1.0.0-0-gabcdef1");

        let root = Path::new(".");
        assert_eq!(mock.head_branch(root).unwrap().as_deref(), Some("main"));
        assert_eq!(
            mock.tags_at(root, "abcdef1234567890abcdef1234567890abcdef12")
                .unwrap(),
            vec!["v1.0.0".to_string()]
        );
        assert_eq!(
            mock.describe(root, "v1.0.0").unwrap().as_deref(),
            Some("v1.0.0-0-gabcdef1")
        );
    }

    #[test]
    fn test_mock_tags_only_at_head_commit() {
        let mut mock = MockFactsProvider::new();
        mock.set_commit("abcdef1234567890abcdef1234567890abcdef12");
        mock.add_tag_at_head("v1.0.0");

        let root = Path::new(".");
        assert!(mock.tags_at(root, NO_COMMIT).unwrap().is_empty());
    }

    #[test]
    fn test_mock_scoped_describe_per_root() {
        let mut mock = MockFactsProvider::new();
        mock.add_describe("1.0.0", "1.0.0-1-gfffffff");
        mock.add_describe_at("/repo-a", "1.0.0", "1.0.0-2-gaaaaaaa");

        assert_eq!(
            mock.describe(Path::new("/repo-a"), "1.0.0").unwrap().as_deref(),
            Some("1.0.0-2-gaaaaaaa")
        );
        assert_eq!(
            mock.describe(Path::new("/repo-b"), "1.0.0").unwrap().as_deref(),
            Some("1.0.0-1-gfffffff")
        );
    }

    #[test]
    fn test_mock_failing_status_check() {
        let mut mock = MockFactsProvider::new();
        mock.fail_status_check();
        assert!(mock.working_tree_clean(Path::new(".")).is_err());
    }

    #[test]
    fn test_mock_counts_head_commit_queries() {
        let mock = MockFactsProvider::new();
        let root = Path::new(".");

        assert_eq!(mock.head_commit_queries(), 0);
        mock.head_commit(root).unwrap();
        mock.head_commit(root).unwrap();
        assert_eq!(mock.head_commit_queries(), 2);
    }
}
