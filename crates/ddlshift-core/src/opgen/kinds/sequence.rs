use crate::{
    model::{ElementKind, Phase, Sequence, Status},
    op::Op,
    opgen::{RuleSetSpec, kinds::log_event, to, to_absent, to_public},
};

pub(super) fn rules() -> [RuleSetSpec<Sequence>; 2] {
    [
        to_public(Status::Absent)
            .equiv(Status::TxnDropped)
            .equiv(Status::Dropped)
            .to(to(Status::Public).emit(|_: &Sequence, _| {
                Some(Op::NotImplemented {
                    element: ElementKind::Sequence,
                })
            })),
        to_absent(Status::Public)
            .to(to(Status::TxnDropped).emit(|this: &Sequence, _| {
                Some(Op::MarkDescriptorAsDroppedSynthetically {
                    desc_id: this.sequence_id,
                })
            }))
            .to(to(Status::Dropped)
                .min_phase(Phase::PreCommit)
                .revertible(false)
                .emit(|this: &Sequence, _| {
                    Some(Op::MarkDescriptorAsDropped {
                        desc_id: this.sequence_id,
                    })
                }))
            .to(to(Status::Absent)
                .min_phase(Phase::PostCommit)
                .emit(|this: &Sequence, ctx| {
                    log_event(this.sequence_id, ElementKind::Sequence, ctx)
                })
                .emit(|this: &Sequence, _| {
                    Some(Op::CreateGcJobForTable {
                        table_id: this.sequence_id,
                    })
                })),
    ]
}
