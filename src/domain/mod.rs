//! Domain logic - pure versioning rules independent of git operations

pub mod coordinates;
pub mod describe;
pub mod rule;
pub mod version;

pub use coordinates::ProjectId;
pub use describe::DescribeFacts;
pub use rule::{CommitRule, RefType, VersionRule};
pub use version::VersionComponents;
