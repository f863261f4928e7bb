use crate::{
    model::{CheckConstraint, Phase, Status},
    op::Op,
    opgen::{RuleSetSpec, to, to_absent, to_public},
};

pub(super) fn rules() -> [RuleSetSpec<CheckConstraint>; 2] {
    [
        to_public(Status::Absent)
            .to(to(Status::WriteOnly).emit(|this: &CheckConstraint, _| {
                Some(Op::MakeAddedCheckConstraintWriteOnly {
                    table_id: this.table_id,
                    constraint_id: this.constraint_id,
                })
            }))
            .to(to(Status::Validated)
                .min_phase(Phase::PostCommit)
                .emit(|this: &CheckConstraint, _| {
                    Some(Op::ValidateCheckConstraint {
                        table_id: this.table_id,
                        constraint_id: this.constraint_id,
                    })
                }))
            .to(to(Status::Public)
                .min_phase(Phase::PostCommit)
                .emit(|this: &CheckConstraint, _| {
                    Some(Op::MakeCheckConstraintPublic {
                        table_id: this.table_id,
                        constraint_id: this.constraint_id,
                    })
                })),
        to_absent(Status::Public)
            .to(to(Status::WriteOnly).emit(|this: &CheckConstraint, _| {
                Some(Op::MakePublicCheckConstraintWriteOnly {
                    table_id: this.table_id,
                    constraint_id: this.constraint_id,
                })
            }))
            .to(to(Status::Absent)
                .min_phase(Phase::PreCommit)
                .revertible(false)
                .emit(|this: &CheckConstraint, _| {
                    Some(Op::RemoveCheckConstraint {
                        table_id: this.table_id,
                        constraint_id: this.constraint_id,
                    })
                })),
    ]
}
