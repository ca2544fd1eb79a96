use crate::advisory::ResolutionWarning;
use crate::config::Config;
use crate::domain::{CommitRule, DescribeFacts, ProjectId, RefType, VersionRule};
use crate::error::{GitVersioningError, Result};
use crate::git::{FactsProvider, RepositoryFacts};
use crate::resolver::{context, matcher, template};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// One fully resolved project version.
///
/// Immutable once constructed; the unit stored in the result cache.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVersion {
    pub id: ProjectId,
    /// The rendered, escaped version string
    pub version: String,
    /// Full hash of the commit the resolution reflects
    pub commit: String,
    pub ref_type: RefType,
    /// Matched ref name with the rule's prefix stripped
    pub ref_name: String,
    /// The substitution context the version was rendered from
    pub context: HashMap<String, String>,
}

impl ResolvedVersion {
    /// The context map plus the expansion of the resolved version
    /// itself, sorted for stable export
    pub fn export_properties(&self) -> BTreeMap<String, String> {
        let mut map = self.context.clone();
        context::expand_version_information(&mut map, "version", &self.version);
        map.into_iter().collect()
    }
}

/// The version resolution engine.
///
/// Owns all session state: the compiled rule lists and three caches
/// (repository facts per root, describe data per root and base version,
/// resolved results per identifier). Construct one per build session
/// and discard it at session end; sessions never share state.
///
/// Access is sequential - callers running resolutions concurrently must
/// provide their own synchronization.
pub struct Resolver<P: FactsProvider> {
    provider: P,
    branch_rules: Vec<VersionRule>,
    tag_rules: Vec<VersionRule>,
    commit_rule: CommitRule,
    properties: HashMap<String, String>,
    provided_commit: Option<String>,
    provided_branch: Option<String>,
    provided_tag: Option<String>,

    facts_cache: HashMap<PathBuf, RepositoryFacts>,
    describe_cache: HashMap<(PathBuf, String), Option<DescribeFacts>>,
    resolved: HashMap<ProjectId, ResolvedVersion>,

    warnings: Vec<ResolutionWarning>,
    warned: HashSet<String>,
}

impl<P: FactsProvider> Resolver<P> {
    /// Compile the configured rules and create a fresh engine with
    /// empty caches
    pub fn new(provider: P, config: &Config) -> Result<Self> {
        let branch_rules = config
            .branch
            .iter()
            .map(|rule| VersionRule::new(&rule.pattern, &rule.prefix, &rule.format))
            .collect::<Result<Vec<_>>>()?;
        let tag_rules = config
            .tag
            .iter()
            .map(|rule| VersionRule::new(&rule.pattern, &rule.prefix, &rule.format))
            .collect::<Result<Vec<_>>>()?;

        Ok(Resolver {
            provider,
            branch_rules,
            tag_rules,
            commit_rule: CommitRule::new(&config.commit.format),
            properties: config.properties.clone(),
            provided_commit: config.overrides.commit.clone(),
            provided_branch: config.overrides.branch.clone(),
            provided_tag: config.overrides.tag.clone(),
            facts_cache: HashMap::new(),
            describe_cache: HashMap::new(),
            resolved: HashMap::new(),
            warnings: Vec::new(),
            warned: HashSet::new(),
        })
    }

    /// Resolve the version for one project identifier.
    ///
    /// Idempotent per identifier for the lifetime of the engine: the
    /// first call computes and caches, subsequent calls return the
    /// cached result unchanged.
    pub fn resolve(&mut self, id: &ProjectId, repo_root: &Path) -> Result<ResolvedVersion> {
        if let Some(hit) = self.resolved.get(id) {
            return Ok(hit.clone());
        }

        let nominal = match &id.version {
            Some(version) => version.clone(),
            None => {
                self.warn_once(
                    format!("missing-version:{}", id),
                    ResolutionWarning::MissingVersion { id: id.to_string() },
                );
                return Err(GitVersioningError::MissingVersion { id: id.to_string() });
            }
        };

        let facts = self.repository_facts(repo_root)?;
        let matched = matcher::select(
            &facts,
            &self.branch_rules,
            &self.tag_rules,
            &self.commit_rule,
        );

        let mut context_map =
            context::build(&nominal, &self.properties, &facts, &matched, &self.tag_rules);

        // describe refinement relative to the composed base version,
        // always written under the `version.` prefix
        if let Some(base_key) = context::base_key(&context_map) {
            if let Some(base) = context::compose_base(&context_map, base_key) {
                if let Some(describe) = self.describe_facts(repo_root, &base)? {
                    context_map.insert(
                        "version.commitCount".to_string(),
                        describe.distance.to_string(),
                    );
                    context_map.insert("version.gcommit".to_string(), describe.gcommit());
                }
            }
        }

        let rendered = template::render(&matched.format, &context_map)?;

        let resolved = ResolvedVersion {
            id: id.clone(),
            version: template::escape(&rendered),
            commit: facts.commit.clone(),
            ref_type: matched.ref_type,
            ref_name: matched.stripped_name().to_string(),
            context: context_map,
        };
        self.resolved.insert(id.clone(), resolved.clone());

        Ok(resolved)
    }

    /// Drain the advisory warnings collected so far
    pub fn take_warnings(&mut self) -> Vec<ResolutionWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn_once(&mut self, subject: String, warning: ResolutionWarning) {
        if self.warned.insert(subject) {
            self.warnings.push(warning);
        }
    }

    fn canonical_root(root: &Path) -> PathBuf {
        root.canonicalize().unwrap_or_else(|_| root.to_path_buf())
    }

    /// Repository facts for a root, computed once per canonicalized
    /// root and cached for the session
    fn repository_facts(&mut self, repo_root: &Path) -> Result<RepositoryFacts> {
        let key = Self::canonical_root(repo_root);

        if let Some(facts) = self.facts_cache.get(&key) {
            return Ok(facts.clone());
        }

        let facts = self.load_facts(&key)?;
        self.facts_cache.insert(key, facts.clone());
        Ok(facts)
    }

    fn load_facts(&mut self, root: &Path) -> Result<RepositoryFacts> {
        match self.provider.working_tree_clean(root) {
            Ok(true) => {}
            Ok(false) => self.warn_once(
                format!("dirty:{}", root.display()),
                ResolutionWarning::DirtyWorkingTree {
                    root: root.to_path_buf(),
                },
            ),
            // the check is advisory only, but its failure is still
            // worth reporting
            Err(e) => self.warn_once(
                format!("status:{}", root.display()),
                ResolutionWarning::StatusCheckFailed {
                    root: root.to_path_buf(),
                    detail: e.to_string(),
                },
            ),
        }

        let mut commit = self.provider.head_commit(root)?;
        if let Some(provided) = &self.provided_commit {
            commit = provided.clone();
        }

        let mut branch = self.provider.head_branch(root)?;
        if let Some(provided) = &self.provided_branch {
            branch = if provided.is_empty() {
                None
            } else {
                Some(provided.clone())
            };
        }

        let mut tags_at_head = self.provider.tags_at(root, &commit)?;
        if let Some(provided) = &self.provided_tag {
            tags_at_head = if provided.is_empty() {
                Vec::new()
            } else {
                vec![provided.clone()]
            };
        }

        let last_tag = self.provider.most_recent_tag(root)?;
        let last_tag_describe = match &last_tag {
            Some(tag) => self.provider.describe(root, tag)?,
            None => None,
        };

        Ok(RepositoryFacts {
            commit,
            branch,
            tags_at_head,
            last_tag,
            last_tag_describe,
        })
    }

    /// Describe data for a base version, memoized per canonicalized
    /// root and base string. Two repositories resolved in one session
    /// may share a base version without seeing each other's data.
    fn describe_facts(&mut self, root: &Path, base: &str) -> Result<Option<DescribeFacts>> {
        let key = (Self::canonical_root(root), base.to_string());
        if let Some(cached) = self.describe_cache.get(&key) {
            return Ok(cached.clone());
        }

        let parsed = self
            .provider
            .describe(&key.0, base)?
            .as_deref()
            .and_then(DescribeFacts::parse);
        self.describe_cache.insert(key, parsed.clone());

        Ok(parsed)
    }
}
