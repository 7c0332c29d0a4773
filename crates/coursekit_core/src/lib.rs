//! Core domain logic for CourseKit.
//! This crate is the single source of truth for course tree invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod tree;
pub mod video;

pub use config::{ConfigError, StoreConfig, NEW_LESSON_ICON_TARGET};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::course::{Course, Lesson, Section, VideoKind, VideoRef};
pub use model::id::{EntityId, EntityKind};
pub use model::patch::{Patch, PatchError};
pub use model::snapshot::Snapshot;
pub use service::course_store::{CourseStore, StoreError, StoreResult};
pub use service::drag::{DragState, DropIndicator};
pub use service::selection::{Selection, View};
pub use service::target_router::{AnchorRef, PendingTarget, RouterError, Target};
pub use tree::{EntityPath, Located, TreeError};
pub use video::{VideoError, VideoInput};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
