use crate::error::{GitVersioningError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Kind of ref a resolution was based on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefType {
    Commit,
    Branch,
    Tag,
}

impl RefType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefType::Commit => "commit",
            RefType::Branch => "branch",
            RefType::Tag => "tag",
        }
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version format rule: pattern to select a ref, literal prefix to
/// strip from the ref name, and format template to render.
///
/// The pattern is anchored - it must match the whole ref name, not a
/// substring of it.
#[derive(Debug, Clone)]
pub struct VersionRule {
    raw_pattern: String,
    pattern: Regex,
    pub prefix: String,
    pub format: String,
}

impl VersionRule {
    pub fn new(
        pattern: impl Into<String>,
        prefix: impl Into<String>,
        format: impl Into<String>,
    ) -> Result<Self> {
        let raw_pattern = pattern.into();
        let anchored = Regex::new(&format!("^(?:{})$", raw_pattern)).map_err(|e| {
            GitVersioningError::pattern(format!("'{}': {}", raw_pattern, e))
        })?;

        Ok(VersionRule {
            raw_pattern,
            pattern: anchored,
            prefix: prefix.into(),
            format: format.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.raw_pattern
    }

    /// Check whether the rule's pattern matches the full ref name
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    /// Remove the rule's literal prefix from a ref name, if present
    pub fn strip_prefix<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.prefix.as_str()).unwrap_or(name)
    }

    /// Extract capture groups from a match against the un-stripped ref
    /// name, keyed both by group position ("1", "2", ...) and, for named
    /// groups, by group name. Empty when the pattern does not match.
    pub fn capture_map(&self, name: &str) -> HashMap<String, String> {
        let mut groups = HashMap::new();

        if let Some(captures) = self.pattern.captures(name) {
            for (index, group_name) in self.pattern.capture_names().enumerate() {
                if index == 0 {
                    continue;
                }
                if let Some(matched) = captures.get(index) {
                    groups.insert(index.to_string(), matched.as_str().to_string());
                    if let Some(group_name) = group_name {
                        groups.insert(group_name.to_string(), matched.as_str().to_string());
                    }
                }
            }
        }

        groups
    }
}

/// The catch-all rule applied when no branch or tag rule matches.
/// It needs no pattern - the ref name is the full commit hash.
#[derive(Debug, Clone)]
pub struct CommitRule {
    pub format: String,
}

impl CommitRule {
    pub fn new(format: impl Into<String>) -> Self {
        CommitRule {
            format: format.into(),
        }
    }
}

impl Default for CommitRule {
    fn default() -> Self {
        CommitRule::new("${commit}")
    }
}
