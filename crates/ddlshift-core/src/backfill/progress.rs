use crate::{
    error::InternalError,
    obs::sink::{self, MetricsEvent},
};
use ddlshift_config::ProgressConfig;
use thiserror::Error as ThisError;

///
/// ProgressError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ProgressError {
    #[error("invalid stage {stage}, scaler has {stages} stages")]
    InvalidStage { stage: usize, stages: usize },

    #[error("fraction {fraction} is outside [0.0, 1.0]")]
    InvalidFraction { fraction: f32 },

    #[error("invalid stage layout: {0}")]
    InvalidStages(String),
}

impl From<ProgressError> for InternalError {
    fn from(err: ProgressError) -> Self {
        Self::progress_input(err.to_string())
    }
}

///
/// MultiStageFractionScaler
///
/// Maps per-stage completion onto one overall fraction. `stages[i]` is the
/// overall fraction reached when stage `i` finishes; the overall fraction
/// never drops below `initial`, which lets a resumed job report progress
/// already made.
///

#[derive(Clone, Debug, PartialEq)]
pub struct MultiStageFractionScaler {
    initial: f32,
    stages: Vec<f32>,
}

impl MultiStageFractionScaler {
    pub fn new(initial: f32, stages: Vec<f32>) -> Result<Self, ProgressError> {
        if !is_unit(initial) {
            return Err(ProgressError::InvalidStages(format!(
                "initial fraction {initial} is outside [0.0, 1.0]"
            )));
        }
        if stages.is_empty() {
            return Err(ProgressError::InvalidStages("no stages".to_string()));
        }
        if let Some(bad) = stages.iter().find(|s| !is_unit(**s)) {
            return Err(ProgressError::InvalidStages(format!(
                "stage ceiling {bad} is outside [0.0, 1.0]"
            )));
        }
        if let Some(w) = stages.windows(2).find(|w| w[1] < w[0]) {
            return Err(ProgressError::InvalidStages(format!(
                "stage ceilings decrease from {} to {}",
                w[0], w[1]
            )));
        }

        Ok(Self { initial, stages })
    }

    /// Scaler for an index backfill, using the configured stage ceilings.
    pub fn for_index_backfill(config: &ProgressConfig, initial: f32) -> Result<Self, ProgressError> {
        Self::new(initial, config.index_backfill_stages.clone())
    }

    #[must_use]
    pub const fn initial(&self) -> f32 {
        self.initial
    }

    #[must_use]
    pub fn stages(&self) -> &[f32] {
        &self.stages
    }

    /// Overall completion after finishing `fraction` of stage `stage`.
    pub fn fraction_complete_from_stage_fraction(
        &self,
        stage: usize,
        fraction: f32,
    ) -> Result<f32, ProgressError> {
        let Some(&ceiling) = self.stages.get(stage) else {
            return Err(ProgressError::InvalidStage {
                stage,
                stages: self.stages.len(),
            });
        };
        if !is_unit(fraction) {
            return Err(ProgressError::InvalidFraction { fraction });
        }

        let floor = if stage == 0 {
            self.initial
        } else {
            self.stages[stage - 1]
        };

        // A finished stage lands exactly on its ceiling, so the next stage
        // starts where this one ended.
        let scaled = if fraction >= 1.0 {
            ceiling
        } else if floor <= ceiling {
            fraction.mul_add(ceiling - floor, floor).min(ceiling)
        } else {
            fraction.mul_add(ceiling - floor, floor)
        };

        Ok(scaled.max(self.initial))
    }
}

// NaN fails the range check.
fn is_unit(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

///
/// ProgressReporter
///
/// Turns stage-local progress into overall fractions, recording each
/// report.
///

#[derive(Clone, Debug)]
pub struct ProgressReporter {
    scaler: MultiStageFractionScaler,
    last: f32,
}

impl ProgressReporter {
    #[must_use]
    pub const fn new(scaler: MultiStageFractionScaler) -> Self {
        let last = scaler.initial;

        Self { scaler, last }
    }

    /// Report progress within `stage` and return the overall fraction.
    pub fn report(&mut self, stage: usize, fraction: f32) -> Result<f32, ProgressError> {
        let overall = self
            .scaler
            .fraction_complete_from_stage_fraction(stage, fraction)?;

        sink::record(MetricsEvent::ProgressReported { stage });
        tracing::debug!(stage, fraction, overall, "backfill progress");

        self.last = overall;
        Ok(overall)
    }

    /// Last overall fraction reported, or the initial fraction.
    #[must_use]
    pub const fn last_reported(&self) -> f32 {
        self.last
    }

    #[must_use]
    pub const fn scaler(&self) -> &MultiStageFractionScaler {
        &self.scaler
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::obs::{metrics_report, metrics_reset_all};
    use proptest::prelude::*;

    const STAGES: [f32; 3] = [0.4, 0.8, 1.0];

    fn scaler(initial: f32) -> MultiStageFractionScaler {
        MultiStageFractionScaler::new(initial, STAGES.to_vec()).expect("valid stages")
    }

    #[test]
    fn fractions_scale_within_stages() {
        let s = scaler(0.0);

        assert_eq!(s.fraction_complete_from_stage_fraction(0, 0.0), Ok(0.0));
        assert_eq!(s.fraction_complete_from_stage_fraction(0, 0.5), Ok(0.20));
        assert_eq!(s.fraction_complete_from_stage_fraction(0, 1.0), Ok(0.40));
        assert_eq!(s.fraction_complete_from_stage_fraction(1, 0.0), Ok(0.40));
    }

    #[test]
    fn initial_fraction_is_a_floor() {
        let s = scaler(0.60);

        assert_eq!(s.fraction_complete_from_stage_fraction(0, 0.0), Ok(0.60));
        assert_eq!(s.fraction_complete_from_stage_fraction(0, 1.0), Ok(0.60));
    }

    #[test]
    fn finished_stage_hits_ceiling_exactly() {
        let s = MultiStageFractionScaler::new(0.0, vec![0.003, 0.015, 1.0]).expect("valid stages");

        assert_eq!(s.fraction_complete_from_stage_fraction(1, 1.0), Ok(0.015));
        assert_eq!(s.fraction_complete_from_stage_fraction(2, 0.0), Ok(0.015));

        for a in 0..=1000u16 {
            for b in a..=1000u16 {
                let (lo, hi) = (f32::from(a) / 1000.0, f32::from(b) / 1000.0);
                let s = MultiStageFractionScaler::new(0.0, vec![lo, hi]).expect("valid stages");

                assert_eq!(s.fraction_complete_from_stage_fraction(1, 1.0), Ok(hi), "[{lo}, {hi}]");
                let partial = s
                    .fraction_complete_from_stage_fraction(1, 0.999)
                    .expect("in range");
                assert!(partial <= hi, "[{lo}, {hi}] overshoots: {partial}");
            }
        }
    }

    #[test]
    fn invalid_stage_is_rejected() {
        assert_eq!(
            scaler(0.60).fraction_complete_from_stage_fraction(5, 0.0),
            Err(ProgressError::InvalidStage {
                stage: 5,
                stages: 3
            })
        );
    }

    #[test]
    fn invalid_fraction_is_rejected() {
        let s = scaler(0.60);

        assert_eq!(
            s.fraction_complete_from_stage_fraction(0, -0.60),
            Err(ProgressError::InvalidFraction { fraction: -0.60 })
        );
        assert_eq!(
            s.fraction_complete_from_stage_fraction(0, 1.2),
            Err(ProgressError::InvalidFraction { fraction: 1.2 })
        );
        assert!(matches!(
            s.fraction_complete_from_stage_fraction(0, f32::NAN),
            Err(ProgressError::InvalidFraction { .. })
        ));
    }

    #[test]
    fn malformed_stage_layouts_are_rejected() {
        for (initial, stages) in [
            (0.0, vec![]),
            (0.0, vec![0.5, 1.5]),
            (0.0, vec![0.8, 0.4]),
            (0.0, vec![f32::NAN]),
            (-0.1, vec![1.0]),
        ] {
            assert!(
                matches!(
                    MultiStageFractionScaler::new(initial, stages.clone()),
                    Err(ProgressError::InvalidStages(_))
                ),
                "{initial} {stages:?}"
            );
        }
    }

    #[test]
    fn index_backfill_scaler_uses_configured_stages() {
        let s = MultiStageFractionScaler::for_index_backfill(&ProgressConfig::default(), 0.0)
            .expect("default stages are valid");

        assert_eq!(s.stages(), &ddlshift_config::DEFAULT_INDEX_BACKFILL_STAGES);
        assert_eq!(s.fraction_complete_from_stage_fraction(1, 1.0), Ok(1.0));
    }

    #[test]
    fn progress_errors_are_invalid_input() {
        let err: InternalError = ProgressError::InvalidFraction { fraction: 2.0 }.into();

        assert_eq!(err.class, crate::error::ErrorClass::InvalidInput);
    }

    #[test]
    fn reporter_tracks_last_fraction_and_records_metrics() {
        metrics_reset_all();
        let mut reporter = ProgressReporter::new(scaler(0.0));
        assert_eq!(reporter.last_reported(), 0.0);

        assert_eq!(reporter.report(0, 0.5), Ok(0.20));
        assert_eq!(reporter.report(1, 0.0), Ok(0.40));
        assert!(reporter.report(7, 0.0).is_err());
        assert_eq!(reporter.last_reported(), 0.40);

        let counters = metrics_report().counters.expect("counters");
        assert_eq!(counters.ops.progress_reports, 2);
        assert_eq!(counters.ops.last_progress_stage, Some(1));
    }

    fn arb_stages() -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(0.0f32..=1.0, 1..6).prop_map(|mut stages| {
            stages.sort_by(f32::total_cmp);
            stages
        })
    }

    proptest! {
        #[test]
        fn overall_fraction_never_drops_below_initial(
            initial in 0.0f32..=1.0,
            stages in arb_stages(),
            stage_seed in any::<usize>(),
            fraction in 0.0f32..=1.0,
        ) {
            let s = MultiStageFractionScaler::new(initial, stages.clone()).expect("valid");
            let stage = stage_seed % stages.len();

            let overall = s.fraction_complete_from_stage_fraction(stage, fraction).expect("in range");
            prop_assert!(overall >= initial);
            prop_assert_eq!(s.fraction_complete_from_stage_fraction(0, 0.0), Ok(initial));
        }

        #[test]
        fn overall_fraction_is_monotonic_within_a_stage(
            initial in 0.0f32..=1.0,
            stages in arb_stages(),
            stage_seed in any::<usize>(),
            a in 0.0f32..=1.0,
            b in 0.0f32..=1.0,
        ) {
            let s = MultiStageFractionScaler::new(initial, stages.clone()).expect("valid");
            let stage = stage_seed % stages.len();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let at_lo = s.fraction_complete_from_stage_fraction(stage, lo).expect("in range");
            let at_hi = s.fraction_complete_from_stage_fraction(stage, hi).expect("in range");
            prop_assert!(at_lo <= at_hi);
        }

        #[test]
        fn finished_stage_reaches_its_ceiling(
            stages in arb_stages(),
            stage_seed in any::<usize>(),
        ) {
            let s = MultiStageFractionScaler::new(0.0, stages.clone()).expect("valid");
            let stage = stage_seed % stages.len();

            let overall = s.fraction_complete_from_stage_fraction(stage, 1.0).expect("in range");
            prop_assert_eq!(overall, stages[stage]);
        }

        #[test]
        fn next_stage_starts_where_previous_ended(
            initial in 0.0f32..=1.0,
            stages in arb_stages(),
        ) {
            let s = MultiStageFractionScaler::new(initial, stages.clone()).expect("valid");

            for stage in 1..stages.len() {
                let finished = s.fraction_complete_from_stage_fraction(stage - 1, 1.0).expect("in range");
                let started = s.fraction_complete_from_stage_fraction(stage, 0.0).expect("in range");
                prop_assert!(finished <= started, "stage {}: {} > {}", stage, finished, started);
            }
        }

        #[test]
        fn out_of_range_stage_always_errors(
            stages in arb_stages(),
            extra in 0usize..8,
            fraction in 0.0f32..=1.0,
        ) {
            let s = MultiStageFractionScaler::new(0.0, stages.clone()).expect("valid");

            let is_invalid_stage = matches!(
                s.fraction_complete_from_stage_fraction(stages.len() + extra, fraction),
                Err(ProgressError::InvalidStage { .. })
            );
            prop_assert!(is_invalid_stage);
        }
    }
}
