//! Operations emitted by transitions.
//!
//! Operations are data. The executor that consumes them lives outside this
//! crate and decides how each one mutates descriptors or schedules jobs.

mod event;

use crate::model::{ColumnId, ConstraintId, DescId, ElementKind, IndexId};
use derive_more::Display;
use serde::{Deserialize, Serialize};

pub use event::{LogEvent, TargetMetadata};

///
/// OpType
///
/// Coarse operation class; executors batch mutations together and run
/// backfills and validations as separate jobs.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum OpType {
    Mutation,
    Backfill,
    Validation,
}

///
/// Op
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Op {
    BackfillIndex {
        table_id: DescId,
        index_id: IndexId,
    },
    CreateGcJobForIndex {
        table_id: DescId,
        index_id: IndexId,
    },
    CreateGcJobForTable {
        table_id: DescId,
    },
    LogEvent(LogEvent),
    MakeAddedCheckConstraintWriteOnly {
        table_id: DescId,
        constraint_id: ConstraintId,
    },
    MakeAddedColumnDeleteAndWriteOnly {
        table_id: DescId,
        column_id: ColumnId,
    },
    MakeAddedColumnDeleteOnly {
        table_id: DescId,
        column_id: ColumnId,
    },
    MakeAddedIndexDeleteAndWriteOnly {
        table_id: DescId,
        index_id: IndexId,
    },
    MakeAddedIndexDeleteOnly {
        table_id: DescId,
        index_id: IndexId,
    },
    MakeAddedSecondaryIndexPublic {
        table_id: DescId,
        index_id: IndexId,
    },
    MakeCheckConstraintPublic {
        table_id: DescId,
        constraint_id: ConstraintId,
    },
    MakeColumnAbsent {
        table_id: DescId,
        column_id: ColumnId,
    },
    MakeColumnPublic {
        table_id: DescId,
        column_id: ColumnId,
    },
    MakeDroppedColumnDeleteAndWriteOnly {
        table_id: DescId,
        column_id: ColumnId,
    },
    MakeDroppedColumnDeleteOnly {
        table_id: DescId,
        column_id: ColumnId,
    },
    MakeDroppedIndexDeleteOnly {
        table_id: DescId,
        index_id: IndexId,
    },
    MakeDroppedNonPrimaryIndexDeleteAndWriteOnly {
        table_id: DescId,
        index_id: IndexId,
    },
    MakeIndexAbsent {
        table_id: DescId,
        index_id: IndexId,
    },
    MakePublicCheckConstraintWriteOnly {
        table_id: DescId,
        constraint_id: ConstraintId,
    },
    MarkDescriptorAsDropped {
        desc_id: DescId,
    },
    MarkDescriptorAsDroppedSynthetically {
        desc_id: DescId,
    },
    /// Placeholder for lifecycles the engine does not drive yet.
    NotImplemented {
        element: ElementKind,
    },
    RemoveAllTableComments {
        table_id: DescId,
    },
    RemoveBackReferenceInTypes {
        back_referenced_desc_id: DescId,
        type_ids: Vec<DescId>,
    },
    RemoveCheckConstraint {
        table_id: DescId,
        constraint_id: ConstraintId,
    },
    RemoveViewBackReferencesInRelations {
        back_referenced_view_id: DescId,
        relation_ids: Vec<DescId>,
    },
    ValidateCheckConstraint {
        table_id: DescId,
        constraint_id: ConstraintId,
    },
    ValidateUniqueIndex {
        table_id: DescId,
        index_id: IndexId,
    },
}

impl Op {
    #[must_use]
    pub const fn op_type(&self) -> OpType {
        match self {
            Self::BackfillIndex { .. } => OpType::Backfill,
            Self::ValidateCheckConstraint { .. } | Self::ValidateUniqueIndex { .. } => {
                OpType::Validation
            }
            _ => OpType::Mutation,
        }
    }

    /// Stable name used in logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BackfillIndex { .. } => "BackfillIndex",
            Self::CreateGcJobForIndex { .. } => "CreateGcJobForIndex",
            Self::CreateGcJobForTable { .. } => "CreateGcJobForTable",
            Self::LogEvent(_) => "LogEvent",
            Self::MakeAddedCheckConstraintWriteOnly { .. } => "MakeAddedCheckConstraintWriteOnly",
            Self::MakeAddedColumnDeleteAndWriteOnly { .. } => "MakeAddedColumnDeleteAndWriteOnly",
            Self::MakeAddedColumnDeleteOnly { .. } => "MakeAddedColumnDeleteOnly",
            Self::MakeAddedIndexDeleteAndWriteOnly { .. } => "MakeAddedIndexDeleteAndWriteOnly",
            Self::MakeAddedIndexDeleteOnly { .. } => "MakeAddedIndexDeleteOnly",
            Self::MakeAddedSecondaryIndexPublic { .. } => "MakeAddedSecondaryIndexPublic",
            Self::MakeCheckConstraintPublic { .. } => "MakeCheckConstraintPublic",
            Self::MakeColumnAbsent { .. } => "MakeColumnAbsent",
            Self::MakeColumnPublic { .. } => "MakeColumnPublic",
            Self::MakeDroppedColumnDeleteAndWriteOnly { .. } => {
                "MakeDroppedColumnDeleteAndWriteOnly"
            }
            Self::MakeDroppedColumnDeleteOnly { .. } => "MakeDroppedColumnDeleteOnly",
            Self::MakeDroppedIndexDeleteOnly { .. } => "MakeDroppedIndexDeleteOnly",
            Self::MakeDroppedNonPrimaryIndexDeleteAndWriteOnly { .. } => {
                "MakeDroppedNonPrimaryIndexDeleteAndWriteOnly"
            }
            Self::MakeIndexAbsent { .. } => "MakeIndexAbsent",
            Self::MakePublicCheckConstraintWriteOnly { .. } => {
                "MakePublicCheckConstraintWriteOnly"
            }
            Self::MarkDescriptorAsDropped { .. } => "MarkDescriptorAsDropped",
            Self::MarkDescriptorAsDroppedSynthetically { .. } => {
                "MarkDescriptorAsDroppedSynthetically"
            }
            Self::NotImplemented { .. } => "NotImplemented",
            Self::RemoveAllTableComments { .. } => "RemoveAllTableComments",
            Self::RemoveBackReferenceInTypes { .. } => "RemoveBackReferenceInTypes",
            Self::RemoveCheckConstraint { .. } => "RemoveCheckConstraint",
            Self::RemoveViewBackReferencesInRelations { .. } => {
                "RemoveViewBackReferencesInRelations"
            }
            Self::ValidateCheckConstraint { .. } => "ValidateCheckConstraint",
            Self::ValidateUniqueIndex { .. } => "ValidateUniqueIndex",
        }
    }
}
