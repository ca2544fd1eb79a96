// tests/git_repo_test.rs
//
// Exercises the git2-backed facts provider and the resolver against
// real on-disk repositories.

use std::fs;
use std::path::Path;

use git2::{Repository, Signature, Time};
use tempfile::TempDir;

use git_versioning::config::{Config, RuleConfig};
use git_versioning::domain::{DescribeFacts, ProjectId, RefType};
use git_versioning::git::{FactsProvider, Git2FactsProvider, NO_COMMIT};
use git_versioning::resolver::Resolver;

fn signature(seconds: i64) -> Signature<'static> {
    Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
        .expect("Could not create signature")
}

fn commit_file(repo: &Repository, name: &str, content: &str, message: &str, seconds: i64) {
    let workdir = repo.workdir().expect("Repository has a working dir");
    fs::write(workdir.join(name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = signature(seconds);

    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("Could not peel HEAD")],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit");
}

fn tag_head(repo: &Repository, name: &str, seconds: i64) {
    let head = repo.head().expect("Could not get HEAD");
    let target = head.peel(git2::ObjectType::Commit).expect("Could not peel");
    repo.tag(name, &target, &signature(seconds), name, false)
        .expect("Could not create tag");
}

/// Two commits; v1.0.0 tags the first, v1.1.0 the second (newest)
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    commit_file(&repo, "README.md", "Initial content\n", "Initial commit", 1_000_000_000);
    tag_head(&repo, "v1.0.0", 1_000_000_010);

    commit_file(&repo, "README.md", "Updated content\n", "Second commit", 1_000_000_100);
    tag_head(&repo, "v1.1.0", 1_000_000_110);

    temp_dir
}

#[test]
fn test_head_commit_and_branch() {
    let temp_dir = setup_test_repo();
    let provider = Git2FactsProvider::new();

    let commit = provider.head_commit(temp_dir.path()).unwrap();
    assert_eq!(commit.len(), 40);
    assert!(commit.chars().all(|c| c.is_ascii_hexdigit()));

    let repo = Repository::open(temp_dir.path()).unwrap();
    let expected = repo.head().unwrap().shorthand().unwrap().to_string();
    let branch = provider.head_branch(temp_dir.path()).unwrap();
    assert_eq!(branch.as_deref(), Some(expected.as_str()));
}

#[test]
fn test_tags_at_head_only() {
    let temp_dir = setup_test_repo();
    let provider = Git2FactsProvider::new();

    let commit = provider.head_commit(temp_dir.path()).unwrap();
    let tags = provider.tags_at(temp_dir.path(), &commit).unwrap();

    assert_eq!(tags, vec!["v1.1.0".to_string()]);
}

#[test]
fn test_most_recent_tag_by_tagger_time() {
    let temp_dir = setup_test_repo();
    let provider = Git2FactsProvider::new();

    let last_tag = provider.most_recent_tag(temp_dir.path()).unwrap();
    assert_eq!(last_tag.as_deref(), Some("v1.1.0"));
}

#[test]
fn test_describe_against_older_tag() {
    let temp_dir = setup_test_repo();
    let provider = Git2FactsProvider::new();

    let describe = provider
        .describe(temp_dir.path(), "v1.0.0")
        .unwrap()
        .expect("describe should find the tag");

    // one commit between HEAD and v1.0.0
    assert!(describe.starts_with("v1.0.0-1-g"), "got '{}'", describe);
    let facts = DescribeFacts::parse(&describe).unwrap();
    assert_eq!(facts.distance, 1);
    assert!(!facts.abbrev.is_empty());
}

#[test]
fn test_describe_missing_base_is_none() {
    let temp_dir = setup_test_repo();
    let provider = Git2FactsProvider::new();

    let describe = provider.describe(temp_dir.path(), "no-such-tag").unwrap();
    assert_eq!(describe, None);
}

#[test]
fn test_working_tree_clean_detection() {
    let temp_dir = setup_test_repo();
    let provider = Git2FactsProvider::new();

    assert!(provider.working_tree_clean(temp_dir.path()).unwrap());

    fs::write(temp_dir.path().join("dirty.txt"), "uncommitted\n").unwrap();
    assert!(!provider.working_tree_clean(temp_dir.path()).unwrap());
}

#[test]
fn test_empty_repository_facts() {
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();
    let provider = Git2FactsProvider::new();

    assert_eq!(provider.head_commit(temp_dir.path()).unwrap(), NO_COMMIT);
    assert!(provider
        .tags_at(temp_dir.path(), NO_COMMIT)
        .unwrap()
        .is_empty());
    assert_eq!(provider.most_recent_tag(temp_dir.path()).unwrap(), None);
}

#[test]
fn test_resolve_against_real_repository() {
    let temp_dir = setup_test_repo();

    let config = Config {
        branch: vec![RuleConfig {
            pattern: ".*".to_string(),
            prefix: String::new(),
            format: "${version.release}-${commit.short}".to_string(),
        }],
        tag: Vec::new(),
        ..Config::default()
    };

    let id = ProjectId::parse("com.example:app:1.2.0-SNAPSHOT").unwrap();
    let mut resolver = Resolver::new(Git2FactsProvider::new(), &config).unwrap();
    let resolved = resolver.resolve(&id, temp_dir.path()).unwrap();

    assert_eq!(resolved.ref_type, RefType::Branch);
    assert!(resolved.version.starts_with("1.2.0-"));
    assert_eq!(resolved.version.len(), "1.2.0-".len() + 7);
    assert_eq!(&resolved.commit[..7], &resolved.version["1.2.0-".len()..]);
}

#[test]
fn test_resolve_detached_head_uses_tag() {
    let temp_dir = setup_test_repo();
    {
        let repo = Repository::open(temp_dir.path()).unwrap();
        let head = repo.head().unwrap().target().unwrap();
        repo.set_head_detached(head).unwrap();
    }

    let config = Config {
        branch: Vec::new(),
        tag: vec![RuleConfig {
            pattern: "v[0-9].*".to_string(),
            prefix: "v".to_string(),
            format: "${tag}".to_string(),
        }],
        ..Config::default()
    };

    let id = ProjectId::parse("com.example:app:1.2.0").unwrap();
    let mut resolver = Resolver::new(Git2FactsProvider::new(), &config).unwrap();
    let resolved = resolver.resolve(&id, temp_dir.path()).unwrap();

    assert_eq!(resolved.ref_type, RefType::Tag);
    assert_eq!(resolved.version, "1.1.0");
}
