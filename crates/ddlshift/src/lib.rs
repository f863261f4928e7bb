//! ## Crate layout
//! - `config`: TOML engine configuration.
//! - `core`: element model, transition registry, selector, phase planner,
//!   validation gate, progress scaling, and observability.
//!
//! [`Engine`] bundles a validated configuration with the built-in registry
//! for callers that drive a whole schema change.

pub use ddlshift_config as config;
pub use ddlshift_core as core;

mod engine;

pub use engine::Engine;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate-wide error, classified by origin and class.
pub use ddlshift_core::error::InternalError as Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Engine, Error,
        config::EngineConfig,
        core::prelude::*,
    };
}
