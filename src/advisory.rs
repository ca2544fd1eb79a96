use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions noticed while resolving versions.
/// These never block resolution but should be reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// The working tree has uncommitted changes; the resolved version
    /// reflects the last commit, not those changes
    DirtyWorkingTree { root: PathBuf },
    /// A project identifier carries no version, so it was left unresolved
    MissingVersion { id: String },
    /// The working-tree status query itself failed; resolution went on
    /// without the cleanliness check
    StatusCheckFailed { root: PathBuf, detail: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::DirtyWorkingTree { root } => {
                write!(
                    f,
                    "Working tree at '{}' is not clean - resolved version reflects the last commit",
                    root.display()
                )
            }
            ResolutionWarning::MissingVersion { id } => {
                write!(f, "Project '{}' has no version - skipped", id)
            }
            ResolutionWarning::StatusCheckFailed { root, detail } => {
                write!(
                    f,
                    "Could not determine working tree status at '{}': {}",
                    root.display(),
                    detail
                )
            }
        }
    }
}
