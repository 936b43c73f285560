// Wristsense - Motion Signal Processing
//
// Per-tick pipeline: filter → step detector → cadence classifier, plus the
// independent raise-to-wake detector fed from the same raw sample.

pub mod cadence;
pub mod filter;
pub mod raise;
pub mod step;

pub use cadence::CadenceClassifier;
pub use filter::EnergyFilter;
pub use raise::RaiseDetector;
pub use step::StepDetector;

use crate::config::*;

/// Tunable thresholds for the sensing pipeline.
#[derive(Debug, Clone)]
pub struct MotionConfig {
    /// EMA weight of the previous value (higher = smoother, slower).
    pub smoothing_alpha: f32,
    /// Smoothed energy above which a peak counts as a footfall (mg).
    pub step_threshold_mg: f32,
    /// Refractory period after an accepted step.
    pub step_min_interval_ms: u32,
    /// Gap after which the walking bout is considered over.
    pub step_max_interval_ms: u32,
    /// Minimum pitch increase for a raise gesture (degrees).
    pub raise_threshold_deg: f32,
    pub raise_accel_min_mg: f32,
    pub raise_accel_max_mg: f32,
    /// Age window of the reference pitch sample.
    pub raise_reference_min_age_ms: u32,
    pub raise_reference_max_age_ms: u32,
    pub raise_cooldown_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: ENERGY_SMOOTHING_ALPHA,
            step_threshold_mg: STEP_THRESHOLD_MG,
            step_min_interval_ms: STEP_MIN_INTERVAL_MS,
            step_max_interval_ms: STEP_MAX_INTERVAL_MS,
            raise_threshold_deg: RAISE_DP_THRESH_DEG,
            raise_accel_min_mg: RAISE_ACCEL_MIN_MG,
            raise_accel_max_mg: RAISE_ACCEL_MAX_MG,
            raise_reference_min_age_ms: RAISE_REFERENCE_MIN_AGE_MS,
            raise_reference_max_age_ms: RAISE_REFERENCE_MAX_AGE_MS,
            raise_cooldown_ms: RAISE_COOLDOWN_MS,
        }
    }
}
