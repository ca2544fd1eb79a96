use thiserror::Error;

/// Unified error type for git-versioning operations
#[derive(Error, Debug)]
pub enum GitVersioningError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rule pattern: {0}")]
    Pattern(String),

    #[error("Project '{id}' has no version to resolve")]
    MissingVersion { id: String },

    #[error("Version format references undefined key '${{{key}}}'")]
    MissingPlaceholder { key: String },

    #[error("Repository access failed: {0}")]
    Repository(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-versioning
pub type Result<T> = std::result::Result<T, GitVersioningError>;

impl GitVersioningError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitVersioningError::Config(msg.into())
    }

    /// Create a pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        GitVersioningError::Pattern(msg.into())
    }

    /// Create a repository access error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        GitVersioningError::Repository(msg.into())
    }

    /// True for errors the caller may downgrade to a warning
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GitVersioningError::MissingVersion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitVersioningError::config("bad rule table");
        assert_eq!(err.to_string(), "Configuration error: bad rule table");
    }

    #[test]
    fn test_missing_placeholder_names_key() {
        let err = GitVersioningError::MissingPlaceholder {
            key: "branch".to_string(),
        };
        assert!(err.to_string().contains("${branch}"));
    }

    #[test]
    fn test_missing_version_is_recoverable() {
        let err = GitVersioningError::MissingVersion {
            id: "g:a".to_string(),
        };
        assert!(err.is_recoverable());
        assert!(!GitVersioningError::repository("gone").is_recoverable());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitVersioningError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(GitVersioningError::pattern("x")
            .to_string()
            .contains("pattern"));
        assert!(GitVersioningError::repository("x")
            .to_string()
            .contains("Repository"));
    }
}
