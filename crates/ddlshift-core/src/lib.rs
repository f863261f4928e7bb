//! Core of ddlshift: the declarative schema-change transition engine.
//!
//! Element kinds declare their status chains in `opgen`; `select` picks the
//! edge to fire for one element, `plan` drives elements through a phase, and
//! `backfill` hosts the constraint validation gate and progress scaling.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod backfill;
pub mod catalog;
pub mod error;
pub mod model;
pub mod obs;
pub mod op;
pub mod opgen;
pub mod plan;
pub mod select;

///
/// Prelude
///
/// Domain vocabulary plus the entry points most callers need.
///

pub mod prelude {
    pub use crate::{
        model::{Direction, Element, ElementKind, Phase, Status},
        op::{Op, TargetMetadata},
        opgen::registry,
        plan::{ElementState, OpSink, PhaseProgress},
        select::select_and_emit,
    };
}
