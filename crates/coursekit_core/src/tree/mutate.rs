//! Path-copying writes.
//!
//! # Responsibility
//! - Merge a `Patch` into the entity at an id (the single field write path).
//! - Insert and remove entities while keeping sibling order.
//!
//! # Invariants
//! - Only the root-to-target path is rebuilt; `Arc::make_mut` clones a node
//!   because the input snapshot still holds it, so untouched siblings keep
//!   pointer identity with the input.
//! - Ids stay unique across the tree: inserts that would reuse one, or that
//!   repeat one inside the inserted subtree, are rejected.
//! - Removing a course or section drops its whole subtree.

use crate::model::course::{Course, Lesson, Section};
use crate::model::id::{EntityId, EntityKind};
use crate::model::patch::{Patch, Patchable};
use crate::model::snapshot::Snapshot;
use crate::tree::locate::{locate, EntityPath, Located};
use crate::tree::{TreeError, TreeResult};
use std::collections::HashSet;
use std::sync::Arc;

/// Merges `patch` into the entity with `id`.
///
/// Returns an unchanged snapshot (sharing every node) when `id` is unknown.
///
/// # Errors
/// - `TreeError::Patch` when the patch does not fit the entity kind or
///   carries a blank title.
pub fn apply_update(snapshot: &Snapshot, id: &EntityId, patch: &Patch) -> TreeResult<Snapshot> {
    let Some(path) = locate(snapshot, id).map(|hit| hit.path()) else {
        return Ok(snapshot.clone());
    };

    let mut courses = snapshot.courses().to_vec();
    let course = Arc::make_mut(&mut courses[path.course]);
    match (path.section, path.lesson) {
        (None, _) => course.apply_patch(patch)?,
        (Some(section_index), None) => {
            Arc::make_mut(&mut course.sections[section_index]).apply_patch(patch)?
        }
        (Some(section_index), Some(lesson_index)) => {
            let section = Arc::make_mut(&mut course.sections[section_index]);
            Arc::make_mut(&mut section.lessons[lesson_index]).apply_patch(patch)?
        }
    }
    Ok(Snapshot::from_shared(courses))
}

/// Appends a course at the end of the dashboard list.
pub fn insert_course(snapshot: &Snapshot, course: Course) -> TreeResult<Snapshot> {
    ensure_ids_free(snapshot, course_ids(&course))?;
    let mut courses = snapshot.courses().to_vec();
    courses.push(Arc::new(course));
    Ok(Snapshot::from_shared(courses))
}

/// Appends a section to the course with `course_id`.
///
/// Returns `Ok(None)` when the course does not exist.
pub fn insert_section(
    snapshot: &Snapshot,
    course_id: &EntityId,
    section: Section,
) -> TreeResult<Option<Snapshot>> {
    let Some(hit) = locate(snapshot, course_id) else {
        return Ok(None);
    };
    let path = expect_kind(&hit, EntityKind::Course)?;
    ensure_ids_free(snapshot, section_ids(&section))?;

    let mut courses = snapshot.courses().to_vec();
    Arc::make_mut(&mut courses[path.course])
        .sections
        .push(Arc::new(section));
    Ok(Some(Snapshot::from_shared(courses)))
}

/// Appends a lesson to the section with `section_id`.
///
/// Returns `Ok(None)` when the section does not exist.
pub fn insert_lesson(
    snapshot: &Snapshot,
    section_id: &EntityId,
    lesson: Lesson,
) -> TreeResult<Option<Snapshot>> {
    let Some(hit) = locate(snapshot, section_id) else {
        return Ok(None);
    };
    let path = expect_kind(&hit, EntityKind::Section)?;
    ensure_ids_free(snapshot, std::iter::once(&lesson.id))?;

    let mut courses = snapshot.courses().to_vec();
    let course = Arc::make_mut(&mut courses[path.course]);
    let section_index = path.section.unwrap_or_default();
    Arc::make_mut(&mut course.sections[section_index])
        .lessons
        .push(Arc::new(lesson));
    Ok(Some(Snapshot::from_shared(courses)))
}

/// Removes the entity with `id`, which must be of `kind`, with its subtree.
///
/// Returns `Ok(None)` when the id does not exist.
pub fn remove(
    snapshot: &Snapshot,
    id: &EntityId,
    kind: EntityKind,
) -> TreeResult<Option<Snapshot>> {
    let Some(hit) = locate(snapshot, id) else {
        return Ok(None);
    };
    let path = expect_kind(&hit, kind)?;

    let mut courses = snapshot.courses().to_vec();
    match (path.section, path.lesson) {
        (None, _) => {
            courses.remove(path.course);
        }
        (Some(section_index), None) => {
            Arc::make_mut(&mut courses[path.course])
                .sections
                .remove(section_index);
        }
        (Some(section_index), Some(lesson_index)) => {
            let course = Arc::make_mut(&mut courses[path.course]);
            Arc::make_mut(&mut course.sections[section_index])
                .lessons
                .remove(lesson_index);
        }
    }
    Ok(Some(Snapshot::from_shared(courses)))
}

fn expect_kind(hit: &Located<'_>, expected: EntityKind) -> TreeResult<EntityPath> {
    if hit.kind() != expected {
        return Err(TreeError::WrongKind {
            id: hit.id().clone(),
            expected,
            found: hit.kind(),
        });
    }
    Ok(hit.path())
}

/// Rejects a course whose subtree carries `reserved` as an entity id.
pub fn ensure_not_reserved(course: &Course, reserved: &str) -> TreeResult<()> {
    match course_ids(course).into_iter().find(|id| id.as_str() == reserved) {
        Some(id) => Err(TreeError::ReservedId(id.clone())),
        None => Ok(()),
    }
}

fn ensure_ids_free<'a>(
    snapshot: &Snapshot,
    ids: impl IntoIterator<Item = &'a EntityId>,
) -> TreeResult<()> {
    let mut incoming = HashSet::new();
    for id in ids {
        if !incoming.insert(id) || locate(snapshot, id).is_some() {
            return Err(TreeError::DuplicateId(id.clone()));
        }
    }
    Ok(())
}

fn course_ids(course: &Course) -> Vec<&EntityId> {
    let mut ids = vec![&course.id];
    for section in &course.sections {
        ids.extend(section_ids(section));
    }
    ids
}

fn section_ids(section: &Section) -> Vec<&EntityId> {
    let mut ids = vec![&section.id];
    ids.extend(section.lessons.iter().map(|lesson| &lesson.id));
    ids
}
