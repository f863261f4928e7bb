//! Metrics sink boundary.
//!
//! Planner, gate and progress code record `MetricsEvent`s here; only the
//! global sink writes into `obs::metrics` state.

use crate::{
    model::{Direction, ElementKind, Phase},
    obs::metrics,
};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    TransitionApplied {
        kind: ElementKind,
        direction: Direction,
        ops: u64,
    },
    PhaseDeferred {
        kind: ElementKind,
        phase: Phase,
    },
    SelectionFailed {
        kind: ElementKind,
    },
    ConstraintValidation {
        skipped: bool,
    },
    ProgressReported {
        stage: usize,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counter state.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::TransitionApplied {
                kind,
                direction,
                ops,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.transitions_applied = m.ops.transitions_applied.saturating_add(1);
                    m.ops.ops_emitted = m.ops.ops_emitted.saturating_add(ops);
                    match direction {
                        Direction::ToPublic => {
                            m.ops.to_public_steps = m.ops.to_public_steps.saturating_add(1);
                        }
                        Direction::ToAbsent => {
                            m.ops.to_absent_steps = m.ops.to_absent_steps.saturating_add(1);
                        }
                    }

                    let entry = m.kinds.entry(kind.to_string()).or_default();
                    entry.transitions_applied = entry.transitions_applied.saturating_add(1);
                    entry.ops_emitted = entry.ops_emitted.saturating_add(ops);
                });
            }

            MetricsEvent::PhaseDeferred { kind, phase } => {
                metrics::with_state_mut(|m| {
                    m.ops.phase_deferrals = m.ops.phase_deferrals.saturating_add(1);
                    if phase == Phase::Statement {
                        m.ops.statement_deferrals = m.ops.statement_deferrals.saturating_add(1);
                    }

                    let entry = m.kinds.entry(kind.to_string()).or_default();
                    entry.phase_deferrals = entry.phase_deferrals.saturating_add(1);
                });
            }

            MetricsEvent::SelectionFailed { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.selection_failures = m.ops.selection_failures.saturating_add(1);
                    let entry = m.kinds.entry(kind.to_string()).or_default();
                    entry.selection_failures = entry.selection_failures.saturating_add(1);
                });
            }

            MetricsEvent::ConstraintValidation { skipped } => {
                metrics::with_state_mut(|m| {
                    if skipped {
                        m.ops.validations_skipped = m.ops.validations_skipped.saturating_add(1);
                    } else {
                        m.ops.validations_required = m.ops.validations_required.saturating_add(1);
                    }
                });
            }

            MetricsEvent::ProgressReported { stage } => {
                metrics::with_state_mut(|m| {
                    m.ops.progress_reports = m.ops.progress_reports.saturating_add(1);
                    m.ops.last_progress_stage = Some(stage);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    // Clone out of the slot so a sink may itself install an override.
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with `sink` receiving every event recorded on this thread.
///
/// The previous sink is restored on return, including on unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Capture(RefCell<Vec<MetricsEvent>>);

    impl MetricsSink for Capture {
        fn record(&self, event: MetricsEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    #[test]
    fn override_captures_and_bypasses_global_state() {
        metrics_reset_all();
        let capture = Rc::new(Capture::default());

        with_metrics_sink(capture.clone(), || {
            record(MetricsEvent::SelectionFailed {
                kind: ElementKind::View,
            });
        });

        assert_eq!(
            capture.0.borrow().as_slice(),
            &[MetricsEvent::SelectionFailed {
                kind: ElementKind::View
            }]
        );
        metrics::with_state(|m| assert_eq!(m.ops.selection_failures, 0));
    }

    #[test]
    fn nested_overrides_restore_in_order() {
        metrics_reset_all();
        let outer = Rc::new(Capture::default());
        let inner = Rc::new(Capture::default());

        with_metrics_sink(outer.clone(), || {
            with_metrics_sink(inner.clone(), || {
                record(MetricsEvent::ConstraintValidation { skipped: true });
            });
            record(MetricsEvent::ConstraintValidation { skipped: false });
        });
        record(MetricsEvent::ProgressReported { stage: 1 });

        assert_eq!(inner.0.borrow().len(), 1);
        assert_eq!(outer.0.borrow().len(), 1);
        metrics::with_state(|m| {
            assert_eq!(m.ops.progress_reports, 1);
            assert_eq!(m.ops.last_progress_stage, Some(1));
        });
    }

    #[test]
    fn override_is_restored_after_panic() {
        metrics_reset_all();
        let capture = Rc::new(Capture::default());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            with_metrics_sink(capture.clone(), || panic!("boom"));
        }));
        assert!(result.is_err());

        record(MetricsEvent::SelectionFailed {
            kind: ElementKind::Table,
        });
        assert!(capture.0.borrow().is_empty());
        metrics::with_state(|m| assert_eq!(m.ops.selection_failures, 1));
    }

    #[test]
    fn global_sink_accumulates_per_kind() {
        metrics_reset_all();

        for ops in [2, 3] {
            record(MetricsEvent::TransitionApplied {
                kind: ElementKind::View,
                direction: Direction::ToAbsent,
                ops,
            });
        }
        record(MetricsEvent::PhaseDeferred {
            kind: ElementKind::View,
            phase: Phase::Statement,
        });

        metrics::with_state(|m| {
            assert_eq!(m.ops.transitions_applied, 2);
            assert_eq!(m.ops.ops_emitted, 5);
            assert_eq!(m.ops.to_absent_steps, 2);
            assert_eq!(m.ops.statement_deferrals, 1);

            let view = &m.kinds["View"];
            assert_eq!(view.transitions_applied, 2);
            assert_eq!(view.phase_deferrals, 1);
        });
    }
}
