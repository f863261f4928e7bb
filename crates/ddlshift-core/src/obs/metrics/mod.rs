use serde::{Deserialize, Serialize};
use std::{cell::RefCell, cmp::Ordering, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for engine activity on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub kinds: BTreeMap<String, KindCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Transitions
    pub transitions_applied: u64,
    pub ops_emitted: u64,
    pub to_public_steps: u64,
    pub to_absent_steps: u64,

    // Selection outcomes
    pub phase_deferrals: u64,
    pub statement_deferrals: u64,
    pub selection_failures: u64,

    // Constraint validation gate
    pub validations_skipped: u64,
    pub validations_required: u64,

    // Backfill progress
    pub progress_reports: u64,
    pub last_progress_stage: Option<usize>,
}

///
/// KindCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct KindCounters {
    pub transitions_applied: u64,
    pub ops_emitted: u64,
    pub phase_deferrals: u64,
    pub selection_failures: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: Option<EventState>,
    /// Per-kind counters, busiest first.
    pub kind_counters: Vec<KindSummary>,
}

///
/// KindSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct KindSummary {
    pub kind: String,
    pub transitions_applied: u64,
    pub ops_emitted: u64,
    pub avg_ops_per_transition: f64,
    pub phase_deferrals: u64,
    pub selection_failures: u64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut kind_counters: Vec<KindSummary> = snap
        .kinds
        .iter()
        .map(|(kind, c)| {
            let avg_ops = if c.transitions_applied > 0 {
                c.ops_emitted as f64 / c.transitions_applied as f64
            } else {
                0.0
            };

            KindSummary {
                kind: kind.clone(),
                transitions_applied: c.transitions_applied,
                ops_emitted: c.ops_emitted,
                avg_ops_per_transition: avg_ops,
                phase_deferrals: c.phase_deferrals,
                selection_failures: c.selection_failures,
            }
        })
        .collect();

    kind_counters.sort_by(|a, b| match b.transitions_applied.cmp(&a.transitions_applied) {
        Ordering::Equal => a.kind.cmp(&b.kind),
        other => other,
    });

    EventReport {
        counters: Some(snap),
        kind_counters,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.transitions_applied = 3;
            m.ops.last_progress_stage = Some(2);
            m.kinds.insert(
                "View".to_string(),
                KindCounters {
                    transitions_applied: 1,
                    ..Default::default()
                },
            );
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops.transitions_applied, 0);
            assert_eq!(m.ops.last_progress_stage, None);
            assert!(m.kinds.is_empty());
        });
    }

    #[test]
    fn report_sorts_kinds_by_transitions_then_name() {
        reset_all();
        with_state_mut(|m| {
            for (kind, transitions, ops) in [("View", 2, 6), ("Column", 3, 3), ("Table", 2, 4)] {
                m.kinds.insert(
                    kind.to_string(),
                    KindCounters {
                        transitions_applied: transitions,
                        ops_emitted: ops,
                        ..Default::default()
                    },
                );
            }
        });

        let report = report();
        let kinds: Vec<_> = report
            .kind_counters
            .iter()
            .map(|k| k.kind.as_str())
            .collect();

        assert_eq!(kinds, ["Column", "Table", "View"]);
        assert_eq!(report.kind_counters[0].avg_ops_per_transition, 1.0);
        assert_eq!(report.kind_counters[2].avg_ops_per_transition, 3.0);
    }
}
