//! Transition selection.
//!
//! Given an element's current and target status and the phase being
//! executed, find the single applicable edge and evaluate its emission
//! functions. Selection is a pure read of the registry.


use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    model::{Direction, Element, ElementKind, Phase, Status},
    op::{Op, TargetMetadata},
    opgen::{EmitContext, Registry, RuleSet, registry},
};
use thiserror::Error as ThisError;

///
/// SelectError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SelectError {
    #[error("no {kind} transition leads from {current} towards {target}")]
    NoApplicableTransition {
        kind: ElementKind,
        current: Status,
        target: Status,
    },

    #[error("{kind} element is already at target status {status}")]
    AlreadyAtTarget { kind: ElementKind, status: Status },

    #[error("{kind} transition {from} -> {to} requires phase {min_phase}, current phase is {phase}")]
    PhaseTooEarly {
        kind: ElementKind,
        from: Status,
        to: Status,
        phase: Phase,
        min_phase: Phase,
    },
}

impl SelectError {
    /// True when the request is valid but must wait for a later phase.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::PhaseTooEarly { .. })
    }

    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::NoApplicableTransition { .. } | Self::AlreadyAtTarget { .. } => {
                ErrorClass::InvariantViolation
            }
            Self::PhaseTooEarly { .. } => ErrorClass::NotReady,
        }
    }
}

impl From<SelectError> for InternalError {
    fn from(err: SelectError) -> Self {
        Self::new(err.class(), ErrorOrigin::Selector, err.to_string())
    }
}

///
/// Emission
///
/// Result of firing one transition: the edge taken and the operations it
/// produced, in declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Emission {
    pub kind: ElementKind,
    pub direction: Direction,
    /// Status the element was in when the edge fired.
    pub current: Status,
    /// Source status of the edge; equivalent statuses collapse onto it.
    pub from: Status,
    pub to: Status,
    pub min_phase: Phase,
    pub revertible: bool,
    pub ops: Vec<Op>,
}

impl Registry {
    /// Select the edge leaving `current` towards `target` and emit its
    /// operations.
    pub fn select_and_emit(
        &self,
        element: &Element,
        current: Status,
        target: Status,
        phase: Phase,
        metadata: Option<&TargetMetadata>,
    ) -> Result<Emission, SelectError> {
        let kind = element.kind();
        if current == target {
            return Err(SelectError::AlreadyAtTarget {
                kind,
                status: current,
            });
        }

        let (rule_set, index) =
            self.resolve(kind, current, target)
                .ok_or(SelectError::NoApplicableTransition {
                    kind,
                    current,
                    target,
                })?;
        let transition = &rule_set.transitions()[index];

        if phase < transition.min_phase() {
            return Err(SelectError::PhaseTooEarly {
                kind,
                from: transition.from(),
                to: transition.to(),
                phase,
                min_phase: transition.min_phase(),
            });
        }

        let ctx = EmitContext {
            direction: rule_set.direction(),
            metadata,
        };
        let ops = transition.emit(element, &ctx);

        tracing::trace!(
            %kind,
            desc_id = %element.descriptor_id(),
            %current,
            from = %transition.from(),
            to = %transition.to(),
            %phase,
            ops = ops.len(),
            "selected transition"
        );

        Ok(Emission {
            kind,
            direction: rule_set.direction(),
            current,
            from: transition.from(),
            to: transition.to(),
            min_phase: transition.min_phase(),
            revertible: transition.revertible(),
            ops,
        })
    }

    // Find the chain in which `current` has an outgoing edge and `target`
    // lies ahead. Chains never branch, so at most one direction qualifies.
    fn resolve(
        &self,
        kind: ElementKind,
        current: Status,
        target: Status,
    ) -> Option<(&RuleSet, usize)> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.transitions_for(kind, direction))
            .find_map(|rule_set| {
                let index = rule_set.position_of(current)?;
                rule_set
                    .reaches(index, target)
                    .then_some((rule_set, index))
            })
    }
}

/// [`Registry::select_and_emit`] against the process-wide registry.
pub fn select_and_emit(
    element: &Element,
    current: Status,
    target: Status,
    phase: Phase,
    metadata: Option<&TargetMetadata>,
) -> Result<Emission, SelectError> {
    registry().select_and_emit(element, current, target, phase, metadata)
}
