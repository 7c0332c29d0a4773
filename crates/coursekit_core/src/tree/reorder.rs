//! Sibling-list reordering.
//!
//! # Invariants
//! - Splice-out then splice-in: the element at `from` is removed first and
//!   `to` is read against the shortened list.
//! - `from == to` yields the input order.
//! - The multiset of elements never changes.
//! - Only one sibling list is touched per call; cross-container moves do not
//!   exist at this layer.

use crate::model::id::EntityId;
use crate::model::snapshot::Snapshot;
use crate::tree::locate::{locate, Located};
use crate::tree::{TreeError, TreeResult};
use std::sync::Arc;

/// Moves the element at `from` so it ends up at index `to`.
///
/// # Errors
/// - `TreeError::IndexOutOfRange` when either index is not a position in
///   `list`; nothing is produced in that case.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> TreeResult<Vec<T>> {
    let len = list.len();
    if from >= len || to >= len {
        return Err(TreeError::IndexOutOfRange { from, to, len });
    }
    let mut items = list.to_vec();
    let moved = items.remove(from);
    items.insert(to, moved);
    Ok(items)
}

/// Reorders the children of `container_id`: a course's sections or a
/// section's lessons.
///
/// Returns `Ok(None)` when the container does not exist.
///
/// # Errors
/// - `TreeError::NotAContainer` when `container_id` is a lesson.
/// - `TreeError::IndexOutOfRange` for indices outside the sibling list.
pub fn reorder_children(
    snapshot: &Snapshot,
    container_id: &EntityId,
    from: usize,
    to: usize,
) -> TreeResult<Option<Snapshot>> {
    let Some(hit) = locate(snapshot, container_id) else {
        return Ok(None);
    };

    let mut courses = snapshot.courses().to_vec();
    match hit {
        Located::Course { course, path } => {
            let sections = reorder(&course.sections, from, to)?;
            Arc::make_mut(&mut courses[path.course]).sections = sections;
        }
        Located::Section { section, path, .. } => {
            let lessons = reorder(&section.lessons, from, to)?;
            let course = Arc::make_mut(&mut courses[path.course]);
            let section_index = path.section.unwrap_or_default();
            Arc::make_mut(&mut course.sections[section_index]).lessons = lessons;
        }
        Located::Lesson { lesson, .. } => {
            return Err(TreeError::NotAContainer(lesson.id.clone()));
        }
    }
    Ok(Some(Snapshot::from_shared(courses)))
}

#[cfg(test)]
mod tests {
    use super::{reorder, reorder_children};
    use crate::model::course::{Course, Lesson, Section};
    use crate::model::id::EntityId;
    use crate::model::snapshot::Snapshot;
    use crate::tree::TreeError;
    use std::sync::Arc;

    #[test]
    fn moves_forward_using_post_removal_index() {
        let list = ["A", "B", "C", "D"];
        assert_eq!(reorder(&list, 0, 2).unwrap(), ["B", "C", "A", "D"]);
    }

    #[test]
    fn moves_backward() {
        let list = ["A", "B", "C", "D"];
        assert_eq!(reorder(&list, 3, 1).unwrap(), ["A", "D", "B", "C"]);
    }

    #[test]
    fn two_to_four_in_five_lands_at_four() {
        let list = ["A", "B", "C", "D", "E"];
        let moved = reorder(&list, 2, 4).unwrap();
        assert_eq!(moved, ["A", "B", "D", "E", "C"]);
        assert_eq!(moved.iter().position(|item| *item == "C"), Some(4));
    }

    #[test]
    fn same_index_keeps_order_for_every_position() {
        let list = ["A", "B", "C"];
        for index in 0..list.len() {
            assert_eq!(reorder(&list, index, index).unwrap(), list);
        }
    }

    #[test]
    fn preserves_multiset_for_every_pair() {
        let list = ["A", "B", "C", "D", "E"];
        let mut expected = list.to_vec();
        expected.sort();
        for from in 0..list.len() {
            for to in 0..list.len() {
                let mut moved = reorder(&list, from, to).unwrap();
                moved.sort();
                assert_eq!(moved, expected);
            }
        }
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let list = ["A", "B"];
        assert_eq!(
            reorder(&list, 2, 0).unwrap_err(),
            TreeError::IndexOutOfRange {
                from: 2,
                to: 0,
                len: 2,
            }
        );
        assert!(reorder(&list, 0, 2).is_err());
        assert!(reorder::<&str>(&[], 0, 0).is_err());
    }

    fn fixture() -> Snapshot {
        Snapshot::new(vec![Course::with_id(
            "course-1".into(),
            "Rust",
            "Course module",
            None,
        )
        .push_section(
            Section::with_id("sec-1".into(), "One", None)
                .push_lesson(Lesson::with_id("les-a".into(), "A", None))
                .push_lesson(Lesson::with_id("les-b".into(), "B", None))
                .push_lesson(Lesson::with_id("les-c".into(), "C", None)),
        )
        .push_section(Section::with_id("sec-2".into(), "Two", None))])
    }

    #[test]
    fn reorders_lessons_inside_one_section() {
        let before = fixture();
        let after = reorder_children(&before, &EntityId::from("sec-1"), 2, 0)
            .unwrap()
            .unwrap();

        let ids: Vec<_> = after.courses()[0].sections[0]
            .lessons
            .iter()
            .map(|lesson| lesson.id.as_str())
            .collect();
        assert_eq!(ids, ["les-c", "les-a", "les-b"]);
        assert!(Arc::ptr_eq(
            &before.courses()[0].sections[1],
            &after.courses()[0].sections[1]
        ));
    }

    #[test]
    fn reorders_sections_of_a_course() {
        let after = reorder_children(&fixture(), &EntityId::from("course-1"), 0, 1)
            .unwrap()
            .unwrap();
        assert_eq!(after.courses()[0].sections[0].id, EntityId::from("sec-2"));
    }

    #[test]
    fn lesson_is_not_a_container_and_unknown_is_absent() {
        let snapshot = fixture();
        assert_eq!(
            reorder_children(&snapshot, &EntityId::from("les-a"), 0, 1).unwrap_err(),
            TreeError::NotAContainer(EntityId::from("les-a"))
        );
        assert!(reorder_children(&snapshot, &EntityId::from("sec-9"), 0, 1)
            .unwrap()
            .is_none());
    }
}
