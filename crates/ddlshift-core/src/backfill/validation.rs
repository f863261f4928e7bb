use crate::{
    catalog::{ConstraintToUpdate, TableDescriptor},
    error::InternalError,
    model::{ColumnId, DescId},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ValidationGateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationGateError {
    #[error("column {column_id} not found on table {table_id}")]
    ColumnNotFound {
        table_id: DescId,
        column_id: ColumnId,
    },
}

impl From<ValidationGateError> for InternalError {
    fn from(err: ValidationGateError) -> Self {
        Self::catalog_invariant(err.to_string())
    }
}

/// Whether `constraint` may be added without a validation scan.
///
/// Only check constraints qualify, and only when every column they
/// reference is a virtual shard column added alongside its hash-sharded
/// index in this change. Such columns are computed from the index
/// definition, so the check holds by construction.
pub fn should_skip_constraint_validation(
    table: &TableDescriptor,
    constraint: &ConstraintToUpdate,
) -> Result<bool, ValidationGateError> {
    let Some(check) = constraint.check() else {
        return Ok(false);
    };
    if check.column_ids.is_empty() {
        return Ok(false);
    }

    let shard_names = added_shard_column_names(table);

    // every id resolves before any is judged
    let mut all_shard_columns = true;
    for &column_id in &check.column_ids {
        let Some(column) = table.find_column(column_id) else {
            return Err(ValidationGateError::ColumnNotFound {
                table_id: table.id,
                column_id,
            });
        };

        all_shard_columns &= column.is_being_added()
            && column.descriptor.is_virtual
            && shard_names.contains(column.descriptor.name.as_str());
    }

    Ok(all_shard_columns)
}

// Shard column names of the sharded indexes being added.
fn added_shard_column_names(table: &TableDescriptor) -> BTreeSet<&str> {
    table
        .added_indexes()
        .filter_map(|index| index.sharded.as_ref())
        .map(|sharded| sharded.shard_column_name.as_str())
        .collect()
}

///
/// TESTS
///
