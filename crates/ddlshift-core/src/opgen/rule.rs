use crate::{
    model::{Direction, Element, ElementKind, Phase, Status},
    op::Op,
    opgen::{EmitContext, Emitter},
};

///
/// Transition
///
/// One edge of a rule chain.
///

#[derive(Debug)]
pub struct Transition {
    pub(crate) from: Status,
    pub(crate) to: Status,
    pub(crate) min_phase: Phase,
    pub(crate) revertible: bool,
    pub(crate) emitters: Vec<Emitter>,
}

impl Transition {
    #[must_use]
    pub const fn from(&self) -> Status {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> Status {
        self.to
    }

    #[must_use]
    pub const fn min_phase(&self) -> Phase {
        self.min_phase
    }

    #[must_use]
    pub const fn revertible(&self) -> bool {
        self.revertible
    }

    #[must_use]
    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// Run every emission function in declaration order, dropping the ones
    /// that produce nothing.
    #[must_use]
    pub fn emit(&self, element: &Element, ctx: &EmitContext<'_>) -> Vec<Op> {
        self.emitters
            .iter()
            .filter_map(|emitter| emitter.emit(element, ctx))
            .collect()
    }
}

///
/// RuleSet
///
/// Ordered transition chain for one (element kind, direction) pair.
///

#[derive(Debug)]
pub struct RuleSet {
    pub(crate) kind: ElementKind,
    pub(crate) direction: Direction,
    pub(crate) start: Status,
    pub(crate) equivalents: Vec<Status>,
    pub(crate) transitions: Vec<Transition>,
}

impl RuleSet {
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn start(&self) -> Status {
        self.start
    }

    #[must_use]
    pub fn equivalents(&self) -> &[Status] {
        &self.equivalents
    }

    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Map an equivalent status onto the chain's starting status.
    #[must_use]
    pub fn collapse(&self, status: Status) -> Status {
        if self.equivalents.contains(&status) {
            self.start
        } else {
            status
        }
    }

    /// Index of the transition leaving `status`, after equivalence collapsing.
    #[must_use]
    pub fn position_of(&self, status: Status) -> Option<usize> {
        let status = self.collapse(status);

        self.transitions.iter().position(|t| t.from == status)
    }

    /// True if `target` is a destination at or after transition `index`.
    #[must_use]
    pub fn reaches(&self, index: usize, target: Status) -> bool {
        self.transitions
            .get(index..)
            .is_some_and(|rest| rest.iter().any(|t| t.to == target))
    }
}
