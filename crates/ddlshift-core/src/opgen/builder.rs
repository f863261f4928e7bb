use crate::{
    model::{Direction, Element, ElementSpec, Phase, Status},
    op::{Op, TargetMetadata},
};
use std::fmt;

///
/// EmitContext
///
/// Uniform input handed to every emission function alongside the element.
/// Optional fields are simply absent when the caller has nothing to supply.
///

#[derive(Clone, Copy, Debug)]
pub struct EmitContext<'a> {
    pub direction: Direction,
    pub metadata: Option<&'a TargetMetadata>,
}

/// Typed emission function for one element kind.
pub type EmitFn<T> = fn(&T, &EmitContext<'_>) -> Option<Op>;

type ErasedEmitFn = dyn Fn(&Element, &EmitContext<'_>) -> Option<Op> + Send + Sync;

///
/// Emitter
///
/// Emission function erased over the element kind. The registry only ever
/// invokes it with elements of the kind it was registered for.
///

pub struct Emitter(Box<ErasedEmitFn>);

impl Emitter {
    pub(crate) fn erase<T: ElementSpec>(f: EmitFn<T>) -> Self {
        Self(Box::new(move |element: &Element, ctx: &EmitContext<'_>| {
            T::downcast(element).and_then(|this| f(this, ctx))
        }))
    }

    pub(crate) fn emit(&self, element: &Element, ctx: &EmitContext<'_>) -> Option<Op> {
        (self.0)(element, ctx)
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Emitter")
    }
}

///
/// RuleSetSpec
///
/// Declaration of one direction's transition chain for element kind `T`.
/// Built with [`to_public`] / [`to_absent`] and consumed by
/// [`RegistryBuilder::register`](super::RegistryBuilder::register).
///

pub struct RuleSetSpec<T> {
    pub(crate) direction: Direction,
    pub(crate) start: Status,
    pub(crate) equivalents: Vec<Status>,
    pub(crate) transitions: Vec<TransitionSpec<T>>,
}

impl<T> RuleSetSpec<T> {
    /// Collapse `status` onto the starting status of this chain.
    #[must_use]
    pub fn equiv(mut self, status: Status) -> Self {
        self.equivalents.push(status);
        self
    }

    /// Append the next edge of the chain.
    #[must_use]
    pub fn to(mut self, transition: TransitionSpec<T>) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// Begin a chain travelling towards `PUBLIC` from `start`.
#[must_use]
pub const fn to_public<T>(start: Status) -> RuleSetSpec<T> {
    RuleSetSpec {
        direction: Direction::ToPublic,
        start,
        equivalents: Vec::new(),
        transitions: Vec::new(),
    }
}

/// Begin a chain travelling towards `ABSENT` from `start`.
#[must_use]
pub const fn to_absent<T>(start: Status) -> RuleSetSpec<T> {
    RuleSetSpec {
        direction: Direction::ToAbsent,
        start,
        equivalents: Vec::new(),
        transitions: Vec::new(),
    }
}

///
/// TransitionSpec
///

pub struct TransitionSpec<T> {
    pub(crate) to: Status,
    pub(crate) min_phase: Phase,
    pub(crate) revertible: bool,
    pub(crate) emitters: Vec<EmitFn<T>>,
}

/// Declare an edge into `dest`. Defaults: earliest phase, revertible.
#[must_use]
pub const fn to<T>(dest: Status) -> TransitionSpec<T> {
    TransitionSpec {
        to: dest,
        min_phase: Phase::Statement,
        revertible: true,
        emitters: Vec::new(),
    }
}

impl<T> TransitionSpec<T> {
    #[must_use]
    pub const fn min_phase(mut self, phase: Phase) -> Self {
        self.min_phase = phase;
        self
    }

    #[must_use]
    pub const fn revertible(mut self, revertible: bool) -> Self {
        self.revertible = revertible;
        self
    }

    /// Append an emission function; functions run in declaration order.
    #[must_use]
    pub fn emit(mut self, f: EmitFn<T>) -> Self {
        self.emitters.push(f);
        self
    }
}
