use crate::{
    model::{Column, ElementKind, Phase, Status},
    op::Op,
    opgen::{RuleSetSpec, kinds::log_event, to, to_absent, to_public},
};

pub(super) fn rules() -> [RuleSetSpec<Column>; 2] {
    [
        to_public(Status::Absent)
            .to(to(Status::DeleteOnly).emit(|this: &Column, _| {
                Some(Op::MakeAddedColumnDeleteOnly {
                    table_id: this.table_id,
                    column_id: this.column_id,
                })
            }))
            .to(to(Status::WriteOnly)
                .min_phase(Phase::PostCommit)
                .emit(|this: &Column, _| {
                    Some(Op::MakeAddedColumnDeleteAndWriteOnly {
                        table_id: this.table_id,
                        column_id: this.column_id,
                    })
                }))
            .to(to(Status::Public)
                .min_phase(Phase::PostCommit)
                .emit(|this: &Column, _| {
                    Some(Op::MakeColumnPublic {
                        table_id: this.table_id,
                        column_id: this.column_id,
                    })
                })
                .emit(|this: &Column, ctx| log_event(this.table_id, ElementKind::Column, ctx))),
        to_absent(Status::Public)
            .to(to(Status::WriteOnly).emit(|this: &Column, _| {
                Some(Op::MakeDroppedColumnDeleteAndWriteOnly {
                    table_id: this.table_id,
                    column_id: this.column_id,
                })
            }))
            .to(to(Status::DeleteOnly)
                .min_phase(Phase::PostCommit)
                .revertible(false)
                .emit(|this: &Column, _| {
                    Some(Op::MakeDroppedColumnDeleteOnly {
                        table_id: this.table_id,
                        column_id: this.column_id,
                    })
                }))
            .to(to(Status::Absent)
                .min_phase(Phase::PostCommit)
                .emit(|this: &Column, ctx| log_event(this.table_id, ElementKind::Column, ctx))
                .emit(|this: &Column, _| {
                    Some(Op::MakeColumnAbsent {
                        table_id: this.table_id,
                        column_id: this.column_id,
                    })
                })),
    ]
}
