//! Backfill-time decisions: which new constraints need a validation scan,
//! and how stage-local progress maps onto overall job progress.

mod progress;
mod validation;

pub use progress::{MultiStageFractionScaler, ProgressError, ProgressReporter};
pub use validation::{ValidationGateError, should_skip_constraint_validation};

use crate::{
    catalog::{ConstraintToUpdate, TableDescriptor},
    obs::sink::{self, MetricsEvent},
};
use ddlshift_config::ValidationConfig;

/// Constraints from `constraints` that still need a validation job, in
/// input order.
pub fn constraints_requiring_validation<'a>(
    table: &TableDescriptor,
    constraints: &'a [ConstraintToUpdate],
    config: &ValidationConfig,
) -> Result<Vec<&'a ConstraintToUpdate>, ValidationGateError> {
    let mut pending = Vec::with_capacity(constraints.len());

    for constraint in constraints {
        let skipped = config.skip_shard_column_checks
            && should_skip_constraint_validation(table, constraint)?;

        sink::record(MetricsEvent::ConstraintValidation { skipped });
        if skipped {
            tracing::debug!(
                table_id = %table.id,
                constraint_type = ?constraint.constraint_type(),
                "skipping validation of shard column constraint"
            );
        } else {
            pending.push(constraint);
        }
    }

    Ok(pending)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{
            CheckConstraintDescriptor, ColumnDescriptor, DescriptorMutation, IndexDescriptor,
            ShardedDescriptor,
        },
        model::{ColumnId, DescId, IndexId},
        obs::{metrics_report, metrics_reset_all},
    };

    fn table() -> TableDescriptor {
        TableDescriptor {
            id: DescId(7),
            name: "orders".to_string(),
            columns: vec![ColumnDescriptor {
                id: ColumnId(1),
                name: "id".to_string(),
                ..Default::default()
            }],
            mutations: vec![
                DescriptorMutation::add_index(IndexDescriptor {
                    id: IndexId(2),
                    name: "orders_id_hash".to_string(),
                    key_column_ids: vec![ColumnId(4), ColumnId(1)],
                    sharded: Some(ShardedDescriptor {
                        shard_column_name: "crdb_internal_id_shard_8".to_string(),
                        shard_buckets: 8,
                        column_names: vec!["id".to_string()],
                    }),
                    ..Default::default()
                }),
                DescriptorMutation::add_column(ColumnDescriptor {
                    id: ColumnId(4),
                    name: "crdb_internal_id_shard_8".to_string(),
                    is_virtual: true,
                    hidden: true,
                    ..Default::default()
                }),
            ],
            ..Default::default()
        }
    }

    fn check(name: &str, column: u32) -> ConstraintToUpdate {
        ConstraintToUpdate::Check(CheckConstraintDescriptor {
            name: name.to_string(),
            expr: String::new(),
            column_ids: vec![ColumnId(column)],
            hidden: false,
        })
    }

    #[test]
    fn shard_checks_are_filtered_out() {
        metrics_reset_all();
        let constraints = [check("shard", 4), check("id_positive", 1)];

        let pending =
            constraints_requiring_validation(&table(), &constraints, &ValidationConfig::default())
                .expect("all columns resolve");

        assert_eq!(pending, vec![&constraints[1]]);
        let counters = metrics_report().counters.expect("counters");
        assert_eq!(counters.ops.validations_skipped, 1);
        assert_eq!(counters.ops.validations_required, 1);
    }

    #[test]
    fn disabled_gate_validates_everything() {
        let constraints = [check("shard", 4), check("id_positive", 1)];
        let config = ValidationConfig {
            skip_shard_column_checks: false,
        };

        let pending = constraints_requiring_validation(&table(), &constraints, &config)
            .expect("gate is not consulted");

        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn unresolvable_column_aborts_the_batch() {
        let constraints = [check("ghost", 9)];

        let err =
            constraints_requiring_validation(&table(), &constraints, &ValidationConfig::default())
                .expect_err("column 9 is missing");

        assert!(matches!(err, ValidationGateError::ColumnNotFound { .. }));
    }
}
