//! Phase planning.
//!
//! Drives elements along their chains within one execution phase: each
//! element takes as many consecutive transitions as the phase allows, and
//! the resulting operations are handed to an [`OpSink`].


use crate::{
    model::{Element, ElementKind, Phase, Status},
    obs::sink::{self, MetricsEvent},
    op::{Op, TargetMetadata},
    opgen::Registry,
    select::{Emission, SelectError},
};
use std::convert::Infallible;

///
/// ElementState
///
/// An element, where it is now, and where the change wants it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElementState {
    pub element: Element,
    pub current: Status,
    pub target: Status,
    pub metadata: Option<TargetMetadata>,
}

impl ElementState {
    #[must_use]
    pub fn new(element: impl Into<Element>, current: Status, target: Status) -> Self {
        Self {
            element: element.into(),
            current,
            target,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: TargetMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.element.kind()
    }
}

///
/// PhaseProgress
///
/// Transitions one element took during a phase.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhaseProgress {
    pub kind: ElementKind,
    pub phase: Phase,
    pub steps: Vec<Emission>,
    pub reached: Status,
    pub target: Status,
    /// Earliest phase in which the next transition may fire.
    pub blocked_until: Option<Phase>,
}

impl PhaseProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.reached == self.target
    }

    /// True if no step taken in this phase is irreversible.
    #[must_use]
    pub fn revertible(&self) -> bool {
        self.steps.iter().all(|step| step.revertible)
    }

    /// Operations in emission order.
    pub fn ops(&self) -> impl Iterator<Item = &Op> {
        self.steps.iter().flat_map(|step| step.ops.iter())
    }

    /// Hand this element's operations to `sink`. Nothing is sent when no
    /// operations were emitted.
    pub fn apply<S: OpSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        let ops: Vec<Op> = self.ops().cloned().collect();
        if ops.is_empty() {
            return Ok(());
        }

        sink.apply(self.phase, &ops)
    }
}

///
/// OpSink
///
/// Receives the ordered operations produced for a phase.
///

pub trait OpSink {
    type Error;

    fn apply(&mut self, phase: Phase, ops: &[Op]) -> Result<(), Self::Error>;
}

impl OpSink for Vec<Op> {
    type Error = Infallible;

    fn apply(&mut self, _phase: Phase, ops: &[Op]) -> Result<(), Self::Error> {
        self.extend_from_slice(ops);
        Ok(())
    }
}

/// Advance one element as far as `phase` permits.
///
/// Stops at the target or at the first transition whose minimum phase is
/// later than `phase`. Any other selection failure aborts the element.
pub fn advance(
    registry: &Registry,
    state: &ElementState,
    phase: Phase,
) -> Result<PhaseProgress, SelectError> {
    let kind = state.kind();
    let mut current = state.current;
    let mut steps = Vec::new();
    let mut blocked_until = None;

    while current != state.target {
        match registry.select_and_emit(
            &state.element,
            current,
            state.target,
            phase,
            state.metadata.as_ref(),
        ) {
            Ok(emission) => {
                sink::record(MetricsEvent::TransitionApplied {
                    kind,
                    direction: emission.direction,
                    ops: emission.ops.len() as u64,
                });
                tracing::debug!(
                    %kind,
                    from = %emission.current,
                    to = %emission.to,
                    %phase,
                    ops = emission.ops.len(),
                    "applied transition"
                );

                current = emission.to;
                steps.push(emission);
            }
            Err(SelectError::PhaseTooEarly { min_phase, to, .. }) => {
                sink::record(MetricsEvent::PhaseDeferred { kind, phase });
                tracing::debug!(%kind, %current, %to, %phase, %min_phase, "transition deferred");

                blocked_until = Some(min_phase);
                break;
            }
            Err(err) => {
                sink::record(MetricsEvent::SelectionFailed { kind });
                tracing::warn!(error = %err, %kind, %current, target = %state.target, "selection failed");

                return Err(err);
            }
        }
    }

    Ok(PhaseProgress {
        kind,
        phase,
        steps,
        reached: current,
        target: state.target,
        blocked_until,
    })
}

/// Advance every element for `phase`, in input order.
pub fn plan_phase(
    registry: &Registry,
    states: &[ElementState],
    phase: Phase,
) -> Result<Vec<PhaseProgress>, SelectError> {
    states
        .iter()
        .map(|state| advance(registry, state, phase))
        .collect()
}
