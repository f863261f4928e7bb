//! Declarative transition registry.
//!
//! Each element kind declares, per direction, a simple chain of status
//! transitions. Every edge carries a minimum phase, a revertibility flag and
//! an ordered list of emission functions that turn the element into
//! operations. Chains are declared with a small builder grammar:
//!
//! ```text
//! to_absent(Status::Public)
//!     .to(to(Status::TxnDropped).emit(..))
//!     .to(to(Status::Dropped).min_phase(Phase::PreCommit).revertible(false).emit(..))
//! ```
//!
//! The process-wide registry is built lazily on first use and is immutable
//! afterwards.

mod builder;
mod kinds;
mod registry;
mod rule;

use std::sync::LazyLock;

pub use builder::{
    EmitContext, EmitFn, Emitter, RuleSetSpec, TransitionSpec, to, to_absent, to_public,
};
pub use registry::{Registry, RegistryBuilder, RegistryError};
pub use rule::{RuleSet, Transition};

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::builtin()
        .unwrap_or_else(|err| panic!("built-in transition registry is malformed: {err}"))
});

/// The process-wide registry of built-in element kinds.
///
/// A malformed built-in declaration is a programming error and panics on
/// first access.
#[must_use]
pub fn registry() -> &'static Registry {
    &REGISTRY
}
