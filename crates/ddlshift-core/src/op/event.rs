use crate::model::{DescId, Direction, ElementKind};
use serde::{Deserialize, Serialize};

///
/// TargetMetadata
///
/// Provenance of a target: which statement of which session asked for it.
/// Carried into event-log operations; never consulted for planning.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TargetMetadata {
    pub statement_id: u32,
    pub sub_work_id: u32,
    pub source_element_id: u32,
    pub statement: String,
    pub username: String,
    pub app_name: String,
}

///
/// LogEvent
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LogEvent {
    pub desc_id: DescId,
    pub element: ElementKind,
    pub direction: Direction,
    pub metadata: TargetMetadata,
}
