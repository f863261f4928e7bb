use crate::{
    Error,
    config::EngineConfig,
    core::{
        backfill::{self, MultiStageFractionScaler, ProgressReporter},
        catalog::{ConstraintToUpdate, TableDescriptor},
        model::Phase,
        opgen::{self, Registry},
        plan::{self, ElementState, PhaseProgress},
    },
};
use std::path::Path;

///
/// Engine
///
/// Validated configuration plus the process-wide transition registry.
///

#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    registry: &'static Registry,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            registry: opgen::registry(),
        })
    }

    /// Build an engine from a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::new(EngineConfig::load(path)?)
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Advance every element through `phase`, recording the reached status
    /// back into `states`.
    ///
    /// On failure no state is updated.
    pub fn run_phase(
        &self,
        states: &mut [ElementState],
        phase: Phase,
    ) -> Result<Vec<PhaseProgress>, Error> {
        let progress = plan::plan_phase(self.registry, states, phase)?;
        for (state, progress) in states.iter_mut().zip(&progress) {
            state.current = progress.reached;
        }

        Ok(progress)
    }

    /// Constraints that still need a validation scan under the configured
    /// gate.
    pub fn constraints_requiring_validation<'a>(
        &self,
        table: &TableDescriptor,
        constraints: &'a [ConstraintToUpdate],
    ) -> Result<Vec<&'a ConstraintToUpdate>, Error> {
        let pending =
            backfill::constraints_requiring_validation(table, constraints, &self.config.validation)?;

        Ok(pending)
    }

    /// Progress reporter for an index backfill resuming at `initial`.
    pub fn index_backfill_reporter(&self, initial: f32) -> Result<ProgressReporter, Error> {
        let scaler = MultiStageFractionScaler::for_index_backfill(&self.config.progress, initial)?;

        Ok(ProgressReporter::new(scaler))
    }
}
