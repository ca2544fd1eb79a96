use crate::domain::{CommitRule, RefType, VersionComponents, VersionRule};
use crate::git::RepositoryFacts;
use std::collections::HashMap;

/// Outcome of rule selection: which ref the resolution is based on,
/// plus the matched rule's prefix, format and capture groups.
#[derive(Debug, Clone)]
pub struct MatchedRef {
    pub ref_type: RefType,
    /// The ref name as found in the repository, prefix not stripped
    pub ref_name: String,
    pub prefix: String,
    pub format: String,
    pub captures: HashMap<String, String>,
}

impl MatchedRef {
    /// The ref name with the matched rule's prefix stripped
    pub fn stripped_name(&self) -> &str {
        self.ref_name
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(&self.ref_name)
    }
}

/// Find the first rule whose pattern matches the full branch name.
/// List order defines priority - a later, more specific rule never
/// overrides an earlier match.
pub fn match_branch<'a>(branch: &str, rules: &'a [VersionRule]) -> Option<&'a VersionRule> {
    rules.iter().find(|rule| rule.matches(branch))
}

/// Find the first rule matching at least one tag, and that rule's
/// highest-versioned tag.
///
/// For each rule in list order, the candidate tags are filtered by the
/// rule's pattern, prefix-stripped, parsed as version components and
/// ranked; the maximum wins. The first rule with any match is taken
/// even if a later rule would match more tags.
pub fn match_tag<'a>(
    tags: &[String],
    rules: &'a [VersionRule],
) -> Option<(&'a VersionRule, String)> {
    for rule in rules {
        let best = tags
            .iter()
            .filter(|tag| rule.matches(tag.as_str()))
            .max_by_key(|tag| VersionComponents::parse(rule.strip_prefix(tag.as_str())));

        if let Some(tag) = best {
            return Some((rule, tag.clone()));
        }
    }
    None
}

/// Select the rule applying to the current repository state: branch
/// rules first, then tag rules against the tags at HEAD, then the
/// catch-all commit rule with the full commit hash as ref name.
pub fn select(
    facts: &RepositoryFacts,
    branch_rules: &[VersionRule],
    tag_rules: &[VersionRule],
    commit_rule: &CommitRule,
) -> MatchedRef {
    if let Some(branch) = &facts.branch {
        if let Some(rule) = match_branch(branch, branch_rules) {
            return MatchedRef {
                ref_type: RefType::Branch,
                ref_name: branch.clone(),
                prefix: rule.prefix.clone(),
                format: rule.format.clone(),
                captures: rule.capture_map(branch),
            };
        }
    }

    if let Some((rule, tag)) = match_tag(&facts.tags_at_head, tag_rules) {
        let captures = rule.capture_map(&tag);
        return MatchedRef {
            ref_type: RefType::Tag,
            ref_name: tag,
            prefix: rule.prefix.clone(),
            format: rule.format.clone(),
            captures,
        };
    }

    MatchedRef {
        ref_type: RefType::Commit,
        ref_name: facts.commit.clone(),
        prefix: String::new(),
        format: commit_rule.format.clone(),
        captures: HashMap::new(),
    }
}
