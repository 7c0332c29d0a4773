//! Session services around the pure tree algorithms.
//!
//! # Responsibility
//! - Hold the per-session state the tree does not own: selection, pending
//!   picker target, drag gesture.
//! - Expose one `CourseStore` facade to UI layers.

pub mod course_store;
pub mod drag;
pub mod selection;
pub mod target_router;
