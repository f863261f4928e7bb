use crate::{
    model::{Phase, SecondaryIndex, Status},
    op::Op,
    opgen::{RuleSetSpec, to, to_absent, to_public},
};

pub(super) fn rules() -> [RuleSetSpec<SecondaryIndex>; 2] {
    [
        to_public(Status::Absent)
            .to(to(Status::DeleteOnly).emit(|this: &SecondaryIndex, _| {
                Some(Op::MakeAddedIndexDeleteOnly {
                    table_id: this.table_id,
                    index_id: this.index_id,
                })
            }))
            .to(to(Status::WriteOnly)
                .min_phase(Phase::PostCommit)
                .emit(|this: &SecondaryIndex, _| {
                    Some(Op::MakeAddedIndexDeleteAndWriteOnly {
                        table_id: this.table_id,
                        index_id: this.index_id,
                    })
                }))
            .to(to(Status::Backfilled)
                .min_phase(Phase::PostCommit)
                .emit(|this: &SecondaryIndex, _| {
                    Some(Op::BackfillIndex {
                        table_id: this.table_id,
                        index_id: this.index_id,
                    })
                }))
            // Non-unique indexes have nothing to validate; the edge still
            // exists so every index walks the same chain.
            .to(to(Status::Validated)
                .min_phase(Phase::PostCommit)
                .emit(|this: &SecondaryIndex, _| {
                    this.unique.then_some(Op::ValidateUniqueIndex {
                        table_id: this.table_id,
                        index_id: this.index_id,
                    })
                }))
            .to(to(Status::Public)
                .min_phase(Phase::PostCommit)
                .emit(|this: &SecondaryIndex, _| {
                    Some(Op::MakeAddedSecondaryIndexPublic {
                        table_id: this.table_id,
                        index_id: this.index_id,
                    })
                })),
        to_absent(Status::Public)
            .to(to(Status::WriteOnly).emit(|this: &SecondaryIndex, _| {
                Some(Op::MakeDroppedNonPrimaryIndexDeleteAndWriteOnly {
                    table_id: this.table_id,
                    index_id: this.index_id,
                })
            }))
            .to(to(Status::DeleteOnly)
                .min_phase(Phase::PostCommit)
                .revertible(false)
                .emit(|this: &SecondaryIndex, _| {
                    Some(Op::MakeDroppedIndexDeleteOnly {
                        table_id: this.table_id,
                        index_id: this.index_id,
                    })
                }))
            .to(to(Status::Absent)
                .min_phase(Phase::PostCommit)
                .emit(|this: &SecondaryIndex, _| {
                    Some(Op::CreateGcJobForIndex {
                        table_id: this.table_id,
                        index_id: this.index_id,
                    })
                })
                .emit(|this: &SecondaryIndex, _| {
                    Some(Op::MakeIndexAbsent {
                        table_id: this.table_id,
                        index_id: this.index_id,
                    })
                })),
    ]
}
