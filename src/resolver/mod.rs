//! Version resolution engine - rule matching, context building,
//! template rendering and session-scoped caching

pub mod context;
pub mod engine;
pub mod matcher;
pub mod template;

pub use engine::{ResolvedVersion, Resolver};
pub use matcher::MatchedRef;
