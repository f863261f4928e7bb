//! Observability: runtime counters and the sink they flow through.
//!
//! Engine code records `MetricsEvent`s through `sink::record` and never
//! touches the counter state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, KindCounters, KindSummary};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
