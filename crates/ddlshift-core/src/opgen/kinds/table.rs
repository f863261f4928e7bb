use crate::{
    model::{ElementKind, Phase, Status, Table},
    op::Op,
    opgen::{RuleSetSpec, kinds::log_event, to, to_absent, to_public},
};

pub(super) fn rules() -> [RuleSetSpec<Table>; 2] {
    [
        to_public(Status::Absent)
            .equiv(Status::TxnDropped)
            .equiv(Status::Dropped)
            .to(to(Status::Public).emit(|_: &Table, _| {
                Some(Op::NotImplemented {
                    element: ElementKind::Table,
                })
            })),
        to_absent(Status::Public)
            .to(to(Status::TxnDropped).emit(|this: &Table, _| {
                Some(Op::MarkDescriptorAsDroppedSynthetically {
                    desc_id: this.table_id,
                })
            }))
            .to(to(Status::Dropped)
                .min_phase(Phase::PreCommit)
                .revertible(false)
                .emit(|this: &Table, _| {
                    Some(Op::MarkDescriptorAsDropped {
                        desc_id: this.table_id,
                    })
                })
                .emit(|this: &Table, _| {
                    Some(Op::RemoveAllTableComments {
                        table_id: this.table_id,
                    })
                }))
            .to(to(Status::Absent)
                .min_phase(Phase::PostCommit)
                .emit(|this: &Table, ctx| log_event(this.table_id, ElementKind::Table, ctx))
                .emit(|this: &Table, _| {
                    Some(Op::CreateGcJobForTable {
                        table_id: this.table_id,
                    })
                })),
    ]
}
