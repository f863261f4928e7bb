use crate::{
    error::InternalError,
    model::{Direction, ElementKind, ElementSpec, Phase, Status},
    opgen::{Emitter, RuleSet, RuleSetSpec, Transition, kinds},
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// RegistryError
///
/// Malformed rule declarations. Always a programming error.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("element kind '{0}' already registered")]
    DuplicateKind(ElementKind),

    #[error("element kind '{0}' registered without rule sets")]
    NoRuleSets(ElementKind),

    #[error("element kind '{kind}' declares direction {direction} twice")]
    DuplicateDirection {
        kind: ElementKind,
        direction: Direction,
    },

    #[error("element kind '{kind}' {direction} chain has no transitions")]
    EmptyChain {
        kind: ElementKind,
        direction: Direction,
    },

    #[error("element kind '{kind}' {direction} transition to {to} emits nothing")]
    NoEmitters {
        kind: ElementKind,
        direction: Direction,
        to: Status,
    },

    #[error("element kind '{kind}' {direction} chain visits {status} twice")]
    RepeatedStatus {
        kind: ElementKind,
        direction: Direction,
        status: Status,
    },

    #[error("element kind '{kind}' {direction} chain must end at {expected}, ends at {found}")]
    WrongTerminal {
        kind: ElementKind,
        direction: Direction,
        expected: Status,
        found: Status,
    },

    #[error(
        "element kind '{kind}' {direction} transition to {to} has min phase {phase} earlier than preceding {previous}"
    )]
    PhaseRegression {
        kind: ElementKind,
        direction: Direction,
        to: Status,
        phase: Phase,
        previous: Phase,
    },
}

impl From<RegistryError> for InternalError {
    fn from(err: RegistryError) -> Self {
        Self::registry_invariant(err.to_string())
    }
}

///
/// Registry
///
/// Immutable mapping from (element kind, direction) to its transition chain.
/// Safe to share across threads once built.
///

#[derive(Debug, Default)]
pub struct Registry {
    rule_sets: BTreeMap<(ElementKind, Direction), RuleSet>,
}

impl Registry {
    /// Build the registry holding every built-in element kind.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut builder = RegistryBuilder::new();
        kinds::register_all(&mut builder)?;

        Ok(builder.build())
    }

    /// Ordered rules for one kind and direction.
    #[must_use]
    pub fn transitions_for(&self, kind: ElementKind, direction: Direction) -> Option<&RuleSet> {
        self.rule_sets.get(&(kind, direction))
    }

    /// Every registered rule set, ordered by kind then direction.
    pub fn rule_sets(&self) -> impl Iterator<Item = &RuleSet> {
        self.rule_sets.values()
    }

    /// Kinds with at least one registered rule set.
    #[must_use]
    pub fn kinds(&self) -> BTreeSet<ElementKind> {
        self.rule_sets.keys().map(|(kind, _)| *kind).collect()
    }
}

///
/// RegistryBuilder
///
/// Single-threaded, write-once construction of a [`Registry`]. Order across
/// kinds does not matter; order of edges within one rule set does.
///

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
    registered: BTreeSet<ElementKind>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every rule set of element kind `T`.
    pub fn register<T: ElementSpec>(
        &mut self,
        rule_sets: impl IntoIterator<Item = RuleSetSpec<T>>,
    ) -> Result<&mut Self, RegistryError> {
        let kind = T::KIND;
        if self.registered.contains(&kind) {
            return Err(RegistryError::DuplicateKind(kind));
        }

        let mut built = BTreeMap::new();
        for spec in rule_sets {
            let direction = spec.direction;
            if built.contains_key(&direction) {
                return Err(RegistryError::DuplicateDirection { kind, direction });
            }
            built.insert(direction, build_rule_set(kind, spec)?);
        }

        if built.is_empty() {
            return Err(RegistryError::NoRuleSets(kind));
        }

        self.registered.insert(kind);
        for (direction, rule_set) in built {
            self.registry.rule_sets.insert((kind, direction), rule_set);
        }

        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> Registry {
        self.registry
    }
}

// Validate one declared chain and erase its emission functions.
fn build_rule_set<T: ElementSpec>(
    kind: ElementKind,
    spec: RuleSetSpec<T>,
) -> Result<RuleSet, RegistryError> {
    let direction = spec.direction;
    let Some(last) = spec.transitions.last() else {
        return Err(RegistryError::EmptyChain { kind, direction });
    };

    let expected = direction.terminal();
    if last.to != expected {
        return Err(RegistryError::WrongTerminal {
            kind,
            direction,
            expected,
            found: last.to,
        });
    }

    let mut seen = BTreeSet::from([spec.start]);
    for status in &spec.equivalents {
        if !seen.insert(*status) {
            return Err(RegistryError::RepeatedStatus {
                kind,
                direction,
                status: *status,
            });
        }
    }

    let mut transitions = Vec::with_capacity(spec.transitions.len());
    let mut from = spec.start;
    let mut previous = Phase::Statement;

    for edge in spec.transitions {
        if !seen.insert(edge.to) {
            return Err(RegistryError::RepeatedStatus {
                kind,
                direction,
                status: edge.to,
            });
        }
        if edge.emitters.is_empty() {
            return Err(RegistryError::NoEmitters {
                kind,
                direction,
                to: edge.to,
            });
        }
        if edge.min_phase < previous {
            return Err(RegistryError::PhaseRegression {
                kind,
                direction,
                to: edge.to,
                phase: edge.min_phase,
                previous,
            });
        }

        transitions.push(Transition {
            from,
            to: edge.to,
            min_phase: edge.min_phase,
            revertible: edge.revertible,
            emitters: edge.emitters.into_iter().map(Emitter::erase::<T>).collect(),
        });

        from = edge.to;
        previous = edge.min_phase;
    }

    Ok(RuleSet {
        kind,
        direction,
        start: spec.start,
        equivalents: spec.equivalents,
        transitions,
    })
}
