//! Immutable tree value.
//!
//! A `Snapshot` is the whole course list at one point in time. Consumers
//! never mutate one; they ask the store for the next. Cloning is cheap: it
//! copies one `Arc` per course and shares everything beneath.

use crate::model::course::Course;
use crate::model::id::EntityId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    courses: Vec<Arc<Course>>,
}

impl Snapshot {
    /// Builds a snapshot from owned courses.
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: courses.into_iter().map(Arc::new).collect(),
        }
    }

    pub(crate) fn from_shared(courses: Vec<Arc<Course>>) -> Self {
        Self { courses }
    }

    /// Courses in dashboard order.
    pub fn courses(&self) -> &[Arc<Course>] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Course with `id`, if it is a course id.
    pub fn course(&self, id: &EntityId) -> Option<&Arc<Course>> {
        self.courses.iter().find(|course| &course.id == id)
    }

    /// Every entity id in depth-first order.
    pub fn ids(&self) -> Vec<&EntityId> {
        let mut ids = Vec::new();
        for course in &self.courses {
            ids.push(&course.id);
            for section in &course.sections {
                ids.push(&section.id);
                ids.extend(section.lessons.iter().map(|lesson| &lesson.id));
            }
        }
        ids
    }
}
