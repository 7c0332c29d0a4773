//! Drag-and-drop reorder gesture.
//!
//! # Responsibility
//! - Track one in-flight drag as an explicit state value.
//! - Turn a completed gesture into at most one reorder request.
//!
//! # Invariants
//! - At most one drag is active; starting another cancels the previous one.
//! - Hover and drop over a different container than the source are ignored.
//! - The drop indicator exists only in `Over`; every exit clears it.
//! - Cancel never produces a reorder.

use crate::model::id::EntityId;

/// One position inside one sibling list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSlot {
    /// Course id for a section list, section id for a lesson list.
    pub container_id: EntityId,
    pub index: usize,
}

/// Drag gesture state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSlot,
    },
    Over {
        source: DragSlot,
        target: usize,
    },
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Caller should reorder `container_id` from `from` to `to`.
    Reorder {
        container_id: EntityId,
        from: usize,
        to: usize,
    },
    NoChange,
}

/// Transient visual marker at the hovered position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndicator {
    pub container_id: EntityId,
    pub index: usize,
}

/// State machine for one sibling-list drag at a time.
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Starts a drag at `index` of `container_id`.
    ///
    /// Returns the source of a drag that was still active and got cancelled.
    pub fn start(&mut self, container_id: EntityId, index: usize) -> Option<DragSlot> {
        let replaced = self.source().cloned();
        self.state = DragState::Dragging {
            source: DragSlot {
                container_id,
                index,
            },
        };
        replaced
    }

    /// Pointer entered position `index` of `container_id`.
    ///
    /// Returns whether the state moved to `Over`.
    pub fn hover(&mut self, container_id: &EntityId, index: usize) -> bool {
        let Some(source) = self.source().cloned() else {
            return false;
        };
        if &source.container_id != container_id {
            return false;
        }
        self.state = DragState::Over {
            source,
            target: index,
        };
        true
    }

    /// Pointer left the hovered position.
    pub fn leave(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            DragState::Over { source, .. } => DragState::Dragging { source },
            other => other,
        };
    }

    /// Completes the gesture at `index` of `container_id`.
    pub fn drop(&mut self, container_id: &EntityId, index: usize) -> DragOutcome {
        let state = std::mem::take(&mut self.state);
        let source = match state {
            DragState::Idle => return DragOutcome::NoChange,
            DragState::Dragging { source } | DragState::Over { source, .. } => source,
        };
        if &source.container_id != container_id || source.index == index {
            return DragOutcome::NoChange;
        }
        DragOutcome::Reorder {
            container_id: source.container_id,
            from: source.index,
            to: index,
        }
    }

    /// Ends the gesture without a drop. Returns whether a drag was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = DragState::Idle;
        was_active
    }

    pub fn drop_indicator(&self) -> Option<DropIndicator> {
        match &self.state {
            DragState::Over { source, target } => Some(DropIndicator {
                container_id: source.container_id.clone(),
                index: *target,
            }),
            _ => None,
        }
    }

    fn source(&self) -> Option<&DragSlot> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { source } | DragState::Over { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragOutcome, DragSession, DragState, DropIndicator};
    use crate::model::id::EntityId;

    fn sec(id: &str) -> EntityId {
        EntityId::from(id)
    }

    #[test]
    fn full_gesture_emits_reorder_and_returns_to_idle() {
        let mut session = DragSession::new();
        session.start(sec("sec-1"), 0);
        assert!(session.hover(&sec("sec-1"), 2));
        assert_eq!(
            session.drop_indicator(),
            Some(DropIndicator {
                container_id: sec("sec-1"),
                index: 2,
            })
        );

        let outcome = session.drop(&sec("sec-1"), 2);
        assert_eq!(
            outcome,
            DragOutcome::Reorder {
                container_id: sec("sec-1"),
                from: 0,
                to: 2,
            }
        );
        assert_eq!(session.state(), &DragState::Idle);
        assert_eq!(session.drop_indicator(), None);
    }

    #[test]
    fn hover_over_other_container_is_ignored() {
        let mut session = DragSession::new();
        session.start(sec("sec-1"), 1);

        assert!(!session.hover(&sec("sec-2"), 0));
        assert!(matches!(session.state(), DragState::Dragging { .. }));
        assert_eq!(session.drop_indicator(), None);
    }

    #[test]
    fn drop_on_other_container_or_same_index_is_no_change() {
        let mut session = DragSession::new();
        session.start(sec("sec-1"), 1);
        assert_eq!(session.drop(&sec("sec-2"), 0), DragOutcome::NoChange);
        assert!(!session.is_active());

        session.start(sec("sec-1"), 1);
        session.hover(&sec("sec-1"), 1);
        assert_eq!(session.drop(&sec("sec-1"), 1), DragOutcome::NoChange);
        assert_eq!(session.drop_indicator(), None);
    }

    #[test]
    fn cancel_and_leave_clear_indicator() {
        let mut session = DragSession::new();
        session.start(sec("sec-1"), 0);
        session.hover(&sec("sec-1"), 1);
        session.leave();
        assert_eq!(session.drop_indicator(), None);
        assert!(session.is_active());

        session.hover(&sec("sec-1"), 1);
        assert!(session.cancel());
        assert_eq!(session.drop_indicator(), None);
        assert!(!session.cancel());
    }

    #[test]
    fn idle_ignores_hover_and_drop() {
        let mut session = DragSession::new();
        assert!(!session.hover(&sec("sec-1"), 0));
        assert_eq!(session.drop(&sec("sec-1"), 0), DragOutcome::NoChange);
    }

    #[test]
    fn new_start_replaces_active_drag() {
        let mut session = DragSession::new();
        session.start(sec("sec-1"), 0);
        let replaced = session.start(sec("course-1"), 3).unwrap();
        assert_eq!(replaced.container_id, sec("sec-1"));
        assert_eq!(
            session.drop(&sec("course-1"), 0),
            DragOutcome::Reorder {
                container_id: sec("course-1"),
                from: 3,
                to: 0,
            }
        );
    }
}
