//! Schema-change vocabulary: element kinds, identifiers, lifecycle statuses,
//! traversal directions, and execution phases.

mod element;
mod id;
mod phase;
mod status;

pub use element::{
    CheckConstraint, Column, Element, ElementKind, ElementSpec, SecondaryIndex, Sequence, Table,
    View,
};
pub use id::{ColumnId, ConstraintId, DescId, IndexId};
pub use phase::Phase;
pub use status::{Direction, Status};
