//! Id lookup across the whole tree.

use crate::model::course::{Course, Lesson, Section};
use crate::model::id::{EntityId, EntityKind};
use crate::model::snapshot::Snapshot;
use std::sync::Arc;

/// Index path from the root to one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityPath {
    pub course: usize,
    pub section: Option<usize>,
    pub lesson: Option<usize>,
}

/// Locator hit: the entity plus its containing parents.
#[derive(Debug, Clone, Copy)]
pub enum Located<'a> {
    Course {
        course: &'a Arc<Course>,
        path: EntityPath,
    },
    Section {
        course: &'a Arc<Course>,
        section: &'a Arc<Section>,
        path: EntityPath,
    },
    Lesson {
        course: &'a Arc<Course>,
        section: &'a Arc<Section>,
        lesson: &'a Arc<Lesson>,
        path: EntityPath,
    },
}

impl<'a> Located<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Course { .. } => EntityKind::Course,
            Self::Section { .. } => EntityKind::Section,
            Self::Lesson { .. } => EntityKind::Lesson,
        }
    }

    pub fn id(&self) -> &'a EntityId {
        match *self {
            Self::Course { course, .. } => &course.id,
            Self::Section { section, .. } => &section.id,
            Self::Lesson { lesson, .. } => &lesson.id,
        }
    }

    pub fn title(&self) -> &'a str {
        match *self {
            Self::Course { course, .. } => &course.title,
            Self::Section { section, .. } => &section.title,
            Self::Lesson { lesson, .. } => &lesson.title,
        }
    }

    pub fn icon(&self) -> Option<&'a str> {
        match *self {
            Self::Course { course, .. } => course.icon.as_deref(),
            Self::Section { section, .. } => section.icon.as_deref(),
            Self::Lesson { lesson, .. } => lesson.icon.as_deref(),
        }
    }

    pub fn path(&self) -> EntityPath {
        match self {
            Self::Course { path, .. } | Self::Section { path, .. } | Self::Lesson { path, .. } => {
                *path
            }
        }
    }

    /// Course that owns the entity (the entity itself for a course).
    pub fn course(&self) -> &'a Arc<Course> {
        match *self {
            Self::Course { course, .. }
            | Self::Section { course, .. }
            | Self::Lesson { course, .. } => course,
        }
    }

    /// Section that owns a lesson, or the section itself.
    pub fn section(&self) -> Option<&'a Arc<Section>> {
        match *self {
            Self::Course { .. } => None,
            Self::Section { section, .. } | Self::Lesson { section, .. } => Some(section),
        }
    }

    pub fn lesson(&self) -> Option<&'a Arc<Lesson>> {
        match *self {
            Self::Lesson { lesson, .. } => Some(lesson),
            _ => None,
        }
    }
}

/// Finds `id` depth-first: each course, then its sections, then their lessons.
///
/// Returns `None` when the id is not in the tree; callers treat that as a
/// silent no-op since UI events can race with deletions.
pub fn locate<'a>(snapshot: &'a Snapshot, id: &EntityId) -> Option<Located<'a>> {
    for (course_index, course) in snapshot.courses().iter().enumerate() {
        if &course.id == id {
            return Some(Located::Course {
                course,
                path: EntityPath {
                    course: course_index,
                    section: None,
                    lesson: None,
                },
            });
        }
        for (section_index, section) in course.sections.iter().enumerate() {
            if &section.id == id {
                return Some(Located::Section {
                    course,
                    section,
                    path: EntityPath {
                        course: course_index,
                        section: Some(section_index),
                        lesson: None,
                    },
                });
            }
            if let Some(lesson_index) = section.position_of(id) {
                return Some(Located::Lesson {
                    course,
                    section,
                    lesson: &section.lessons[lesson_index],
                    path: EntityPath {
                        course: course_index,
                        section: Some(section_index),
                        lesson: Some(lesson_index),
                    },
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{locate, EntityPath};
    use crate::model::course::{Course, Lesson, Section};
    use crate::model::id::{EntityId, EntityKind};
    use crate::model::snapshot::Snapshot;

    fn fixture() -> Snapshot {
        Snapshot::new(vec![
            Course::with_id("course-a".into(), "A", "Course module", None),
            Course::with_id("course-b".into(), "B", "Course module", None)
                .push_section(Section::with_id("sec-1".into(), "One", None))
                .push_section(
                    Section::with_id("sec-2".into(), "Two", None)
                        .push_lesson(Lesson::with_id("les-1".into(), "First", None))
                        .push_lesson(Lesson::with_id("les-2".into(), "Second", None)),
                ),
        ])
    }

    #[test]
    fn locates_lesson_with_parents_and_path() {
        let snapshot = fixture();
        let hit = locate(&snapshot, &EntityId::from("les-2")).unwrap();

        assert_eq!(hit.kind(), EntityKind::Lesson);
        assert_eq!(hit.course().id, EntityId::from("course-b"));
        assert_eq!(hit.section().unwrap().id, EntityId::from("sec-2"));
        assert_eq!(
            hit.path(),
            EntityPath {
                course: 1,
                section: Some(1),
                lesson: Some(1),
            }
        );
    }

    #[test]
    fn locates_course_and_section_levels() {
        let snapshot = fixture();

        let course = locate(&snapshot, &EntityId::from("course-a")).unwrap();
        assert_eq!(course.kind(), EntityKind::Course);
        assert!(course.section().is_none());

        let section = locate(&snapshot, &EntityId::from("sec-1")).unwrap();
        assert_eq!(section.kind(), EntityKind::Section);
        assert_eq!(section.title(), "One");
    }

    #[test]
    fn unknown_id_is_absent() {
        assert!(locate(&fixture(), &EntityId::from("les-404")).is_none());
    }
}
