//! Course, Section and Lesson records.
//!
//! # Responsibility
//! - Define the three entity levels of the authoring tree.
//! - Provide constructors that encode creation defaults (empty children,
//!   sections open).
//!
//! # Invariants
//! - A Section belongs to exactly one Course, a Lesson to exactly one Section.
//! - Child order is display order; there is no separate priority field.
//! - `Section::is_open` is presentation state and never affects containment.

use crate::model::id::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a lesson video is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoKind {
    /// Embeddable remote player URL.
    RemoteEmbed,
    /// Reference to a file picked on the operator's machine.
    LocalFile,
}

/// Video attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    pub url: String,
    pub kind: VideoKind,
}

/// Top-level course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    pub title: String,
    pub subtitle: String,
    pub icon: Option<String>,
    /// Image reference shown on the dashboard card.
    pub banner: Option<String>,
    pub sections: Vec<Arc<Section>>,
}

impl Course {
    /// Creates an empty course with a generated id.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        icon: Option<String>,
    ) -> Self {
        Self::with_id(EntityId::generate(EntityKind::Course), title, subtitle, icon)
    }

    /// Creates an empty course with a caller-provided id.
    pub fn with_id(
        id: EntityId,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        icon: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            subtitle: subtitle.into(),
            icon,
            banner: None,
            sections: Vec::new(),
        }
    }

    /// Appends a section, builder style. Used to assemble fixtures and seeds.
    pub fn push_section(mut self, section: Section) -> Self {
        self.sections.push(Arc::new(section));
        self
    }

    /// Total lessons across all sections.
    pub fn lesson_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.lessons.len())
            .sum()
    }

    /// First lesson of the first section that has any lesson.
    pub fn first_lesson(&self) -> Option<&Arc<Lesson>> {
        self.sections
            .iter()
            .find_map(|section| section.lessons.first())
    }

    /// Section that directly contains `lesson_id`.
    pub fn section_containing(&self, lesson_id: &EntityId) -> Option<&Arc<Section>> {
        self.sections
            .iter()
            .find(|section| section.position_of(lesson_id).is_some())
    }
}

/// Ordered group of lessons inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: EntityId,
    pub title: String,
    pub icon: Option<String>,
    pub is_open: bool,
    pub lessons: Vec<Arc<Lesson>>,
}

impl Section {
    /// Creates an empty, open section with a generated id.
    pub fn new(title: impl Into<String>, icon: Option<String>) -> Self {
        Self::with_id(EntityId::generate(EntityKind::Section), title, icon)
    }

    /// Creates an empty, open section with a caller-provided id.
    pub fn with_id(id: EntityId, title: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon,
            is_open: true,
            lessons: Vec::new(),
        }
    }

    /// Appends a lesson, builder style.
    pub fn push_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(Arc::new(lesson));
        self
    }

    /// Index of `lesson_id` among this section's lessons.
    pub fn position_of(&self, lesson_id: &EntityId) -> Option<usize> {
        self.lessons.iter().position(|lesson| &lesson.id == lesson_id)
    }
}

/// Single unit of course material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: EntityId,
    pub title: String,
    pub icon: Option<String>,
    pub video: Option<VideoRef>,
    /// Free-text body edited in the lesson editor.
    pub content: Option<String>,
}

impl Lesson {
    /// Creates a lesson with a generated id and an empty content body.
    pub fn new(title: impl Into<String>, icon: Option<String>) -> Self {
        Self::with_id(EntityId::generate(EntityKind::Lesson), title, icon)
    }

    /// Creates a lesson with a caller-provided id and an empty content body.
    pub fn with_id(id: EntityId, title: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon,
            video: None,
            content: Some(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Course, Lesson, Section, VideoKind, VideoRef};
    use crate::model::id::EntityId;

    #[test]
    fn first_lesson_skips_empty_sections() {
        let course = Course::new("Rust", "Course module", None)
            .push_section(Section::new("Intro", None))
            .push_section(
                Section::new("Basics", None)
                    .push_lesson(Lesson::with_id("les-1".into(), "Ownership", None))
                    .push_lesson(Lesson::with_id("les-2".into(), "Borrowing", None)),
            );

        let first = course.first_lesson().unwrap();
        assert_eq!(first.id, EntityId::from("les-1"));
        assert_eq!(course.lesson_count(), 2);
    }

    #[test]
    fn new_section_starts_open_and_empty() {
        let section = Section::new("Intro", Some("📑".to_string()));
        assert!(section.is_open);
        assert!(section.lessons.is_empty());
    }

    #[test]
    fn video_kind_uses_snake_case_wire_names() {
        let video = VideoRef {
            url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            kind: VideoKind::RemoteEmbed,
        };
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["kind"], "remote_embed");
    }
}
