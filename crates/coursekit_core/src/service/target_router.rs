//! Pending target for externally picked values (icon picker).
//!
//! # Responsibility
//! - Remember which entity an open picker writes to, and where it is anchored.
//! - Stage the icon of a lesson that does not exist yet, plus the draft
//!   (target section) that lesson will be created in.
//!
//! # Invariants
//! - At most one pending target; opening another replaces it.
//! - Closing without a value has no side effect.
//! - The router never touches the tree; it tells the caller what to write.

use crate::model::id::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque reference to the UI element a picker is anchored to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef(pub String);

impl From<&str> for AnchorRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// What a resolved value is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Icon of an existing (or since-deleted) entity.
    Entity(EntityId),
    /// Icon of the lesson being drafted.
    NewLessonIcon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTarget {
    pub target: Target,
    pub anchor: AnchorRef,
}

/// Instruction for the caller after a value resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Write `icon` to entity `id` through the mutation path.
    ApplyIcon { id: EntityId, icon: String },
    /// Value was staged for the next lesson creation.
    Staged,
}

/// Lesson creation in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDraft {
    pub section_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No picker is open.
    NoPendingTarget,
    /// Picked value is blank after trim.
    BlankValue,
}

impl Display for RouterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPendingTarget => write!(f, "no pending target to resolve"),
            Self::BlankValue => write!(f, "picked value must not be blank"),
        }
    }
}

impl Error for RouterError {}

/// Routes picked values by target id.
#[derive(Debug, Clone)]
pub struct TargetRouter {
    sentinel: String,
    default_lesson_icon: String,
    pending: Option<PendingTarget>,
    draft: Option<LessonDraft>,
    staged_icon: String,
}

impl TargetRouter {
    /// `sentinel` is the reserved id for the new-lesson icon.
    pub fn new(sentinel: impl Into<String>, default_lesson_icon: impl Into<String>) -> Self {
        let default_lesson_icon = default_lesson_icon.into();
        Self {
            sentinel: sentinel.into(),
            staged_icon: default_lesson_icon.clone(),
            default_lesson_icon,
            pending: None,
            draft: None,
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Opens a picker for `id`. Returns the target it replaced, if any.
    pub fn open(&mut self, id: &str, anchor: AnchorRef) -> Option<PendingTarget> {
        let target = if id == self.sentinel {
            Target::NewLessonIcon
        } else {
            Target::Entity(EntityId::from(id))
        };
        self.pending.replace(PendingTarget { target, anchor })
    }

    /// Closes the picker without a value.
    pub fn close(&mut self) -> Option<PendingTarget> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingTarget> {
        self.pending.as_ref()
    }

    /// Consumes the pending target with `value`.
    ///
    /// # Errors
    /// - `NoPendingTarget` when no picker is open.
    /// - `BlankValue` for a blank value; the picker stays open.
    pub fn resolve(&mut self, value: &str) -> Result<Dispatch, RouterError> {
        if self.pending.is_none() {
            return Err(RouterError::NoPendingTarget);
        }
        let value = value.trim();
        if value.is_empty() {
            return Err(RouterError::BlankValue);
        }
        let Some(pending) = self.pending.take() else {
            return Err(RouterError::NoPendingTarget);
        };
        match pending.target {
            Target::Entity(id) => Ok(Dispatch::ApplyIcon {
                id,
                icon: value.to_string(),
            }),
            Target::NewLessonIcon => {
                self.staged_icon = value.to_string();
                Ok(Dispatch::Staged)
            }
        }
    }

    /// Icon the next drafted lesson will be created with.
    pub fn staged_lesson_icon(&self) -> &str {
        &self.staged_icon
    }

    /// Starts drafting a lesson in `section_id`; resets the staged icon.
    pub fn begin_draft(&mut self, section_id: EntityId) {
        self.staged_icon = self.default_lesson_icon.clone();
        self.draft = Some(LessonDraft { section_id });
    }

    pub fn draft(&self) -> Option<&LessonDraft> {
        self.draft.as_ref()
    }

    /// Takes the draft and its staged icon for creation.
    pub fn take_draft(&mut self) -> Option<(LessonDraft, String)> {
        let draft = self.draft.take()?;
        Some((draft, self.staged_icon.clone()))
    }

    /// Restores a draft whose creation was rejected.
    pub(crate) fn restore_draft(&mut self, draft: LessonDraft) {
        self.draft = Some(draft);
    }

    pub fn discard_draft(&mut self) -> Option<LessonDraft> {
        self.draft.take()
    }
}

#[cfg(test)]
mod tests {
    use super::{AnchorRef, Dispatch, RouterError, Target, TargetRouter};
    use crate::model::id::EntityId;

    fn router() -> TargetRouter {
        TargetRouter::new("new-lesson-icon", "📄")
    }

    #[test]
    fn entity_target_dispatches_icon_write() {
        let mut router = router();
        router.open("les-1", AnchorRef::from("icon-button"));

        let dispatch = router.resolve("🔥").unwrap();
        assert_eq!(
            dispatch,
            Dispatch::ApplyIcon {
                id: EntityId::from("les-1"),
                icon: "🔥".to_string(),
            }
        );
        assert!(router.pending().is_none());
    }

    #[test]
    fn sentinel_target_stages_icon() {
        let mut router = router();
        router.begin_draft(EntityId::from("sec-1"));
        router.open("new-lesson-icon", AnchorRef::from("modal"));
        assert_eq!(router.pending().unwrap().target, Target::NewLessonIcon);

        assert_eq!(router.resolve("🎯").unwrap(), Dispatch::Staged);
        let (draft, icon) = router.take_draft().unwrap();
        assert_eq!(draft.section_id, EntityId::from("sec-1"));
        assert_eq!(icon, "🎯");
    }

    #[test]
    fn opening_replaces_and_closing_discards() {
        let mut router = router();
        router.open("les-1", AnchorRef::from("a"));
        let replaced = router.open("sec-2", AnchorRef::from("b")).unwrap();
        assert_eq!(replaced.target, Target::Entity(EntityId::from("les-1")));

        assert!(router.close().is_some());
        assert_eq!(router.resolve("🔥"), Err(RouterError::NoPendingTarget));
    }

    #[test]
    fn blank_value_keeps_picker_open() {
        let mut router = router();
        router.open("les-1", AnchorRef::from("a"));
        assert_eq!(router.resolve("  "), Err(RouterError::BlankValue));
        assert!(router.pending().is_some());
    }

    #[test]
    fn begin_draft_resets_staged_icon() {
        let mut router = router();
        router.open("new-lesson-icon", AnchorRef::from("modal"));
        router.resolve("🎯").unwrap();
        assert_eq!(router.staged_lesson_icon(), "🎯");

        router.begin_draft(EntityId::from("sec-1"));
        assert_eq!(router.staged_lesson_icon(), "📄");
    }
}
