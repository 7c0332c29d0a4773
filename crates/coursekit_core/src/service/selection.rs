//! Session selection derived from ids.
//!
//! # Responsibility
//! - Hold the selected course id, selected lesson id and active view.
//! - Derive current course/section/lesson from a snapshot on demand.
//! - Reconcile ids against each new snapshot after a mutation.
//!
//! # Invariants
//! - Current section is never stored; it is the section of the selected
//!   course that contains the selected lesson.
//! - A selected lesson always belongs to the selected course.
//! - Losing the selected lesson clears it without falling back to another.
//! - Losing the selected course clears both ids and returns to the dashboard.

use crate::model::course::{Course, Lesson, Section};
use crate::model::id::EntityId;
use crate::model::snapshot::Snapshot;
use crate::tree::locate::{locate, Located};
use std::sync::Arc;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Editor,
    Profile,
    Settings,
}

/// Id-based selection state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    course_id: Option<EntityId>,
    lesson_id: Option<EntityId>,
    view: View,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course_id(&self) -> Option<&EntityId> {
        self.course_id.as_ref()
    }

    pub fn lesson_id(&self) -> Option<&EntityId> {
        self.lesson_id.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Opens course `id` in the editor and auto-selects its first lesson.
    ///
    /// Returns `false` (no change) when `id` is not a course.
    pub fn select_course(&mut self, snapshot: &Snapshot, id: &EntityId) -> bool {
        let Some(course) = snapshot.course(id) else {
            return false;
        };
        self.course_id = Some(course.id.clone());
        self.lesson_id = course.first_lesson().map(|lesson| lesson.id.clone());
        self.view = View::Editor;
        true
    }

    /// Selects lesson `id`, switching to its course when needed.
    ///
    /// Returns `false` (no change) when `id` is not a lesson.
    pub fn select_lesson(&mut self, snapshot: &Snapshot, id: &EntityId) -> bool {
        let Some(Located::Lesson { course, lesson, .. }) = locate(snapshot, id) else {
            return false;
        };
        self.course_id = Some(course.id.clone());
        self.lesson_id = Some(lesson.id.clone());
        true
    }

    /// Switches screens; the dashboard drops both selections.
    pub fn navigate(&mut self, view: View) {
        if view == View::Dashboard {
            self.course_id = None;
            self.lesson_id = None;
        }
        self.view = view;
    }

    /// Drops ids that no longer resolve in `snapshot`.
    ///
    /// Returns whether anything was cleared.
    pub fn reconcile(&mut self, snapshot: &Snapshot) -> bool {
        let Some(course_id) = self.course_id.clone() else {
            return false;
        };
        let Some(course) = snapshot.course(&course_id) else {
            self.course_id = None;
            self.lesson_id = None;
            self.view = View::Dashboard;
            return true;
        };
        let lesson_gone = self
            .lesson_id
            .as_ref()
            .is_some_and(|lesson_id| course.section_containing(lesson_id).is_none());
        if lesson_gone {
            self.lesson_id = None;
        }
        lesson_gone
    }

    pub fn current_course<'a>(&self, snapshot: &'a Snapshot) -> Option<&'a Arc<Course>> {
        snapshot.course(self.course_id.as_ref()?)
    }

    pub fn current_section<'a>(&self, snapshot: &'a Snapshot) -> Option<&'a Arc<Section>> {
        let lesson_id = self.lesson_id.as_ref()?;
        self.current_course(snapshot)?.section_containing(lesson_id)
    }

    pub fn current_lesson<'a>(&self, snapshot: &'a Snapshot) -> Option<&'a Arc<Lesson>> {
        let lesson_id = self.lesson_id.as_ref()?;
        let section = self.current_section(snapshot)?;
        section
            .position_of(lesson_id)
            .map(|index| &section.lessons[index])
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, View};
    use crate::model::course::{Course, Lesson, Section};
    use crate::model::id::EntityId;
    use crate::model::snapshot::Snapshot;

    fn fixture() -> Snapshot {
        Snapshot::new(vec![
            Course::with_id("course-1".into(), "One", "Course module", None)
                .push_section(Section::with_id("sec-empty".into(), "Empty", None))
                .push_section(
                    Section::with_id("sec-full".into(), "Full", None)
                        .push_lesson(Lesson::with_id("les-1".into(), "L1", None))
                        .push_lesson(Lesson::with_id("les-2".into(), "L2", None)),
                ),
            Course::with_id("course-2".into(), "Two", "Course module", None).push_section(
                Section::with_id("sec-other".into(), "Other", None)
                    .push_lesson(Lesson::with_id("les-9".into(), "L9", None)),
            ),
            Course::with_id("course-3".into(), "Three", "Course module", None),
        ])
    }

    #[test]
    fn select_course_picks_first_lesson_of_first_non_empty_section() {
        let snapshot = fixture();
        let mut selection = Selection::new();

        assert!(selection.select_course(&snapshot, &EntityId::from("course-1")));
        assert_eq!(selection.view(), View::Editor);
        assert_eq!(
            selection.current_lesson(&snapshot).unwrap().id,
            EntityId::from("les-1")
        );
        assert_eq!(
            selection.current_section(&snapshot).unwrap().id,
            EntityId::from("sec-full")
        );
    }

    #[test]
    fn select_empty_course_selects_no_lesson() {
        let snapshot = fixture();
        let mut selection = Selection::new();
        selection.select_course(&snapshot, &EntityId::from("course-3"));

        assert!(selection.current_course(&snapshot).is_some());
        assert!(selection.current_lesson(&snapshot).is_none());
        assert!(selection.current_section(&snapshot).is_none());
    }

    #[test]
    fn select_lesson_in_other_course_switches_course() {
        let snapshot = fixture();
        let mut selection = Selection::new();
        selection.select_course(&snapshot, &EntityId::from("course-1"));

        assert!(selection.select_lesson(&snapshot, &EntityId::from("les-9")));
        assert_eq!(selection.course_id(), Some(&EntityId::from("course-2")));
        assert!(!selection.select_lesson(&snapshot, &EntityId::from("sec-full")));
        assert_eq!(selection.lesson_id(), Some(&EntityId::from("les-9")));
    }

    #[test]
    fn unknown_course_is_ignored() {
        let mut selection = Selection::new();
        assert!(!selection.select_course(&fixture(), &EntityId::from("course-404")));
        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn navigating_to_dashboard_clears_selection() {
        let snapshot = fixture();
        let mut selection = Selection::new();
        selection.select_course(&snapshot, &EntityId::from("course-1"));

        selection.navigate(View::Settings);
        assert!(selection.course_id().is_some());

        selection.navigate(View::Dashboard);
        assert!(selection.course_id().is_none());
        assert!(selection.lesson_id().is_none());
    }
}
