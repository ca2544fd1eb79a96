use crate::error::{GitVersioningError, Result};
use crate::git::{FactsProvider, NO_COMMIT};
use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Oid, Repository, StatusOptions};
use std::path::Path;

/// Facts provider backed by real repositories via the `git2` crate.
///
/// Holds no repository handle of its own - each query discovers the
/// repository from the given root. The resolver caches the resulting
/// facts per root, so each repository is only read a handful of times.
#[derive(Debug, Default)]
pub struct Git2FactsProvider;

impl Git2FactsProvider {
    pub fn new() -> Self {
        Git2FactsProvider
    }

    fn open(&self, root: &Path) -> Result<Repository> {
        Repository::discover(root).map_err(|e| {
            GitVersioningError::repository(format!(
                "Cannot open repository at '{}': {}",
                root.display(),
                e
            ))
        })
    }
}

impl FactsProvider for Git2FactsProvider {
    fn head_commit(&self, root: &Path) -> Result<String> {
        let repo = self.open(root)?;

        // bind before returning so no borrow of `repo` survives the match
        let commit = match repo.head() {
            Ok(head) => match head.target() {
                Some(oid) => oid.to_string(),
                None => NO_COMMIT.to_string(),
            },
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                NO_COMMIT.to_string()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(commit)
    }

    fn head_branch(&self, root: &Path) -> Result<Option<String>> {
        let repo = self.open(root)?;

        if repo.head_detached()? {
            return Ok(None);
        }

        // HEAD is a symbolic ref to the current branch, even before the
        // first commit exists
        let head = repo.find_reference("HEAD")?;
        Ok(head
            .symbolic_target()
            .map(|target| target.trim_start_matches("refs/heads/").to_string()))
    }

    fn tags_at(&self, root: &Path, commit: &str) -> Result<Vec<String>> {
        let repo = self.open(root)?;

        let target = match Oid::from_str(commit) {
            Ok(oid) => oid,
            Err(_) => return Ok(Vec::new()),
        };

        let mut tags = Vec::new();
        for name in repo.tag_names(None)?.iter().flatten() {
            let reference = match repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };

            // peel annotated tags down to the commit they point at
            if let Ok(object) = reference.peel(git2::ObjectType::Commit) {
                if object.id() == target {
                    tags.push(name.to_string());
                }
            }
        }

        Ok(tags)
    }

    fn most_recent_tag(&self, root: &Path) -> Result<Option<String>> {
        let repo = self.open(root)?;

        let mut best: Option<(i64, String)> = None;
        for name in repo.tag_names(None)?.iter().flatten() {
            let reference = match repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            let oid = match reference.target() {
                Some(oid) => oid,
                None => continue,
            };

            // annotated tags carry a tagger timestamp; lightweight tags
            // fall back to the commit time
            let when = match repo.find_tag(oid) {
                Ok(tag) => tag
                    .tagger()
                    .map(|tagger| tagger.when().seconds())
                    .unwrap_or(0),
                Err(_) => match repo.find_commit(oid) {
                    Ok(commit) => commit.time().seconds(),
                    Err(_) => continue,
                },
            };

            let newer = match &best {
                Some((latest, _)) => when >= *latest,
                None => true,
            };
            if newer {
                best = Some((when, name.to_string()));
            }
        }

        Ok(best.map(|(_, name)| name))
    }

    fn describe(&self, root: &Path, base: &str) -> Result<Option<String>> {
        let repo = self.open(root)?;

        let mut options = DescribeOptions::new();
        options.describe_tags().pattern(base);

        let describe = match repo.describe(&options) {
            Ok(describe) => describe,
            // no tag matching the base ref is reachable from HEAD
            Err(_) => return Ok(None),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(7).always_use_long_format(true);

        Ok(describe.format(Some(&format)).ok())
    }

    fn working_tree_clean(&self, root: &Path) -> Result<bool> {
        let repo = self.open(root)?;

        let mut options = StatusOptions::new();
        options.include_untracked(true);

        let statuses = repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }
}
