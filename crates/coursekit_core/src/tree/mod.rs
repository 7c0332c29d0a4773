//! Pure snapshot algorithms over the course tree.
//!
//! # Responsibility
//! - Locate entities by id across the single flat id space.
//! - Produce new snapshots by path copying: only the touched node and its
//!   ancestors are rebuilt, every other node is shared by `Arc`.
//! - Reorder one sibling list with splice-out/splice-in semantics.
//!
//! # Invariants
//! - Functions never mutate their input snapshot.
//! - Unknown ids are reported as absence (`None` / unchanged snapshot), never
//!   as an error.

use crate::model::id::{EntityId, EntityKind};
use crate::model::patch::PatchError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod locate;
pub mod mutate;
pub mod reorder;

pub use locate::{locate, EntityPath, Located};
pub use mutate::{
    apply_update, ensure_not_reserved, insert_course, insert_lesson, insert_section, remove,
};
pub use reorder::{reorder, reorder_children};

/// Result type used by tree algorithms.
pub type TreeResult<T> = Result<T, TreeError>;

/// Invalid-input errors from tree algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Patch rejected for the located entity.
    Patch(PatchError),
    /// Id resolves to an entity of another level than the operation needs.
    WrongKind {
        id: EntityId,
        expected: EntityKind,
        found: EntityKind,
    },
    /// Id resolves to a lesson, which has no sibling list beneath it.
    NotAContainer(EntityId),
    /// Reorder index outside the sibling list.
    IndexOutOfRange { from: usize, to: usize, len: usize },
    /// Inserted entity reuses an id already present in the tree or in the
    /// inserted subtree.
    DuplicateId(EntityId),
    /// Inserted entity carries an id reserved for routing.
    ReservedId(EntityId),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patch(err) => write!(f, "{err}"),
            Self::WrongKind {
                id,
                expected,
                found,
            } => write!(f, "entity {id} is a {found}, expected a {expected}"),
            Self::NotAContainer(id) => write!(f, "entity {id} has no children to reorder"),
            Self::IndexOutOfRange { from, to, len } => write!(
                f,
                "reorder indices out of range: from {from} to {to} in list of {len}"
            ),
            Self::DuplicateId(id) => write!(f, "entity id already in use: {id}"),
            Self::ReservedId(id) => write!(f, "entity id is reserved: {id}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Patch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatchError> for TreeError {
    fn from(value: PatchError) -> Self {
        Self::Patch(value)
    }
}
