//! Course tree domain model.
//!
//! # Responsibility
//! - Define the canonical Course → Section → Lesson shapes read by every view.
//! - Define the partial-field `Patch` record used by the single write path.
//!
//! # Invariants
//! - Every entity is identified by an `EntityId` unique across the whole tree.
//! - Children are held behind `Arc` so snapshots can share untouched nodes.

pub mod course;
pub mod id;
pub mod patch;
pub mod snapshot;
