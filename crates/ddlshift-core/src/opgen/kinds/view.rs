use crate::{
    model::{ElementKind, Phase, Status, View},
    op::Op,
    opgen::{RuleSetSpec, kinds::log_event, to, to_absent, to_public},
};

pub(super) fn rules() -> [RuleSetSpec<View>; 2] {
    [
        to_public(Status::Absent)
            .equiv(Status::TxnDropped)
            .equiv(Status::Dropped)
            .to(to(Status::Public).emit(|_: &View, _| {
                Some(Op::NotImplemented {
                    element: ElementKind::View,
                })
            })),
        to_absent(Status::Public)
            .to(to(Status::TxnDropped).emit(|this: &View, _| {
                Some(Op::MarkDescriptorAsDroppedSynthetically {
                    desc_id: this.view_id,
                })
            }))
            .to(to(Status::Dropped)
                .min_phase(Phase::PreCommit)
                .revertible(false)
                .emit(|this: &View, _| {
                    Some(Op::MarkDescriptorAsDropped {
                        desc_id: this.view_id,
                    })
                })
                .emit(|this: &View, _| {
                    if this.uses_type_ids.is_empty() {
                        return None;
                    }
                    Some(Op::RemoveBackReferenceInTypes {
                        back_referenced_desc_id: this.view_id,
                        type_ids: this.uses_type_ids.clone(),
                    })
                })
                .emit(|this: &View, _| {
                    if this.uses_relation_ids.is_empty() {
                        return None;
                    }
                    Some(Op::RemoveViewBackReferencesInRelations {
                        back_referenced_view_id: this.view_id,
                        relation_ids: this.uses_relation_ids.clone(),
                    })
                })
                .emit(|this: &View, _| {
                    Some(Op::RemoveAllTableComments {
                        table_id: this.view_id,
                    })
                }))
            .to(to(Status::Absent)
                .min_phase(Phase::PostCommit)
                .emit(|this: &View, ctx| log_event(this.view_id, ElementKind::View, ctx))
                .emit(|this: &View, _| {
                    Some(Op::CreateGcJobForTable {
                        table_id: this.view_id,
                    })
                })),
    ]
}
