//! Table descriptor snapshot as seen by the backfill planner.
//!
//! Only the shape the engine reads is modelled: public columns, in-flight
//! column and index mutations, and the constraints being added. Storage and
//! mutation of descriptors happen elsewhere.

use crate::model::{ColumnId, DescId, IndexId};
use serde::{Deserialize, Serialize};

///
/// TableDescriptor
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub id: DescId,
    pub parent_id: DescId,
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub primary_index: IndexDescriptor,
    pub mutations: Vec<DescriptorMutation>,
}

impl TableDescriptor {
    /// Resolve a column among public columns and column mutations.
    #[must_use]
    pub fn find_column(&self, id: ColumnId) -> Option<ColumnRef<'_>> {
        let public = self
            .columns
            .iter()
            .find(|c| c.id == id)
            .map(|descriptor| ColumnRef {
                descriptor,
                mutation: None,
            });

        public.or_else(|| {
            self.mutations.iter().find_map(|m| match &m.descriptor {
                MutationDescriptor::Column(descriptor) if descriptor.id == id => Some(ColumnRef {
                    descriptor,
                    mutation: Some(m.direction),
                }),
                _ => None,
            })
        })
    }

    /// Indexes being added in the in-flight change.
    pub fn added_indexes(&self) -> impl Iterator<Item = &IndexDescriptor> {
        self.mutations.iter().filter_map(|m| match &m.descriptor {
            MutationDescriptor::Index(i) if m.direction == MutationDirection::Add => Some(i),
            _ => None,
        })
    }
}

///
/// ColumnRef
/// A resolved column plus the direction of its mutation, if it has one.
///

#[derive(Clone, Copy, Debug)]
pub struct ColumnRef<'a> {
    pub descriptor: &'a ColumnDescriptor,
    pub mutation: Option<MutationDirection>,
}

impl ColumnRef<'_> {
    #[must_use]
    pub fn is_being_added(&self) -> bool {
        self.mutation == Some(MutationDirection::Add)
    }
}

///
/// ColumnDescriptor
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub nullable: bool,
    /// Computed on read and never stored.
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub hidden: bool,
}

///
/// IndexDescriptor
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexDescriptor {
    pub id: IndexId,
    pub name: String,
    pub key_column_ids: Vec<ColumnId>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub sharded: Option<ShardedDescriptor>,
}

///
/// ShardedDescriptor
///
/// Hash-sharding layout of an index: the hidden shard column is computed
/// from the listed key columns modulo `shard_buckets`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShardedDescriptor {
    pub shard_column_name: String,
    pub shard_buckets: u32,
    pub column_names: Vec<String>,
}

///
/// DescriptorMutation
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DescriptorMutation {
    pub descriptor: MutationDescriptor,
    pub direction: MutationDirection,
}

impl DescriptorMutation {
    #[must_use]
    pub const fn add_column(column: ColumnDescriptor) -> Self {
        Self {
            descriptor: MutationDescriptor::Column(column),
            direction: MutationDirection::Add,
        }
    }

    #[must_use]
    pub const fn add_index(index: IndexDescriptor) -> Self {
        Self {
            descriptor: MutationDescriptor::Index(index),
            direction: MutationDirection::Add,
        }
    }
}

///
/// MutationDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MutationDescriptor {
    Column(ColumnDescriptor),
    Index(IndexDescriptor),
}

///
/// MutationDirection
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MutationDirection {
    Add,
    Drop,
}

///
/// ConstraintType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConstraintType {
    Check,
    ForeignKey,
    Unique,
    NotNull,
}

///
/// ConstraintToUpdate
///
/// A constraint being added to a table in the in-flight change.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConstraintToUpdate {
    Check(CheckConstraintDescriptor),
    ForeignKey(ForeignKeyDescriptor),
    Unique(UniqueConstraintDescriptor),
    NotNull { column_id: ColumnId },
}

impl ConstraintToUpdate {
    #[must_use]
    pub const fn constraint_type(&self) -> ConstraintType {
        match self {
            Self::Check(_) => ConstraintType::Check,
            Self::ForeignKey(_) => ConstraintType::ForeignKey,
            Self::Unique(_) => ConstraintType::Unique,
            Self::NotNull { .. } => ConstraintType::NotNull,
        }
    }

    /// The check constraint, if this is one.
    #[must_use]
    pub const fn check(&self) -> Option<&CheckConstraintDescriptor> {
        match self {
            Self::Check(check) => Some(check),
            _ => None,
        }
    }
}

///
/// CheckConstraintDescriptor
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CheckConstraintDescriptor {
    pub name: String,
    pub expr: String,
    pub column_ids: Vec<ColumnId>,
    #[serde(default)]
    pub hidden: bool,
}

///
/// ForeignKeyDescriptor
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ForeignKeyDescriptor {
    pub name: String,
    pub origin_column_ids: Vec<ColumnId>,
    pub referenced_table_id: DescId,
    pub referenced_column_ids: Vec<ColumnId>,
}

///
/// UniqueConstraintDescriptor
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UniqueConstraintDescriptor {
    pub name: String,
    pub column_ids: Vec<ColumnId>,
}
