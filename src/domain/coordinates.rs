use crate::error::{GitVersioningError, Result};
use std::fmt;

/// Project coordinates (group, artifact, version)
///
/// Identifies one buildable component. Used as the result cache key,
/// so equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl ProjectId {
    /// Create a new project identifier
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        ProjectId {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    /// Parse a `group:artifact[:version]` coordinate string
    pub fn parse(coordinates: &str) -> Result<Self> {
        let mut parts = coordinates.splitn(3, ':');
        let group = parts.next().unwrap_or("");
        let artifact = parts.next().unwrap_or("");
        if group.is_empty() || artifact.is_empty() {
            return Err(GitVersioningError::config(format!(
                "Invalid coordinates '{}' - expected group:artifact[:version]",
                coordinates
            )));
        }
        let version = parts.next().filter(|v| !v.is_empty()).map(str::to_string);

        Ok(ProjectId::new(group, artifact, version))
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}
