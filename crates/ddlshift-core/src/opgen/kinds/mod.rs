//! Built-in rule sets, one module per element kind.

mod check_constraint;
mod column;
mod secondary_index;
mod sequence;
mod table;
mod view;

use crate::{
    model::{DescId, ElementKind},
    op::{LogEvent, Op},
    opgen::{EmitContext, RegistryBuilder, RegistryError},
};

pub(super) fn register_all(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register(check_constraint::rules())?
        .register(column::rules())?
        .register(secondary_index::rules())?
        .register(sequence::rules())?
        .register(table::rules())?
        .register(view::rules())?;

    Ok(())
}

// Event-log record for the target; emitted only when provenance is known.
fn log_event(desc_id: DescId, element: ElementKind, ctx: &EmitContext<'_>) -> Option<Op> {
    ctx.metadata.map(|metadata| {
        Op::LogEvent(LogEvent {
            desc_id,
            element,
            direction: ctx.direction,
            metadata: metadata.clone(),
        })
    })
}
