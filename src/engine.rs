// Wristsense - Motion Engine
//
// Owns every piece of sensing state.  The sensing task feeds it one sample
// per tick; UI and status code only see the published `MotionStatus`.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;

use crate::daily::DailyCounter;
use crate::events::{AccelSample, ActivityState, StepEvent};
use crate::hal::LocalTime;
use crate::motion::{CadenceClassifier, EnergyFilter, MotionConfig, RaiseDetector, StepDetector};

// ---------------------------------------------------------------------------
// Read-only view shared with other tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MotionStatus {
    steps: AtomicU32,
    activity: AtomicU8,
}

impl MotionStatus {
    /// Current daily total, monotonic within a day.
    pub fn step_count(&self) -> u32 {
        self.steps.load(Ordering::Relaxed)
    }

    pub fn activity(&self) -> ActivityState {
        ActivityState::from_u8(self.activity.load(Ordering::Relaxed))
    }

    /// Progress towards `goal` steps in percent, capped at 100.
    pub fn goal_percent(&self, goal: u32) -> u32 {
        let goal = goal.max(1);
        let steps = self.step_count();
        if steps >= goal {
            100
        } else {
            (steps as u64 * 100 / goal as u64) as u32
        }
    }

    fn publish(&self, steps: u32, activity: ActivityState) {
        self.steps.store(steps, Ordering::Relaxed);
        self.activity.store(activity as u8, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// What one processed sample produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub energy: f32,
    pub step: Option<StepEvent>,
    pub raise: bool,
}

#[derive(Debug)]
pub struct MotionEngine {
    filter: EnergyFilter,
    steps: StepDetector,
    cadence: CadenceClassifier,
    raise: RaiseDetector,
    daily: DailyCounter,
    activity: ActivityState,
    status: Arc<MotionStatus>,
}

impl MotionEngine {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            filter: EnergyFilter::new(config.smoothing_alpha),
            steps: StepDetector::new(config),
            cadence: CadenceClassifier::new(),
            raise: RaiseDetector::new(config),
            daily: DailyCounter::new(),
            activity: ActivityState::Idle,
            status: Arc::new(MotionStatus::default()),
        }
    }

    /// Handle for UI / status readers.
    pub fn status(&self) -> Arc<MotionStatus> {
        Arc::clone(&self.status)
    }

    pub fn step_count(&self) -> u32 {
        self.daily.step_count()
    }

    pub fn activity(&self) -> ActivityState {
        self.activity
    }

    pub fn energy(&self) -> f32 {
        self.filter.energy()
    }

    /// Midnight check; cheap enough to run every tick.
    pub fn roll_over(&mut self, now: &LocalTime) -> bool {
        let reset = self.daily.roll_over(now);
        if reset {
            self.status.publish(self.daily.step_count(), self.activity);
        }
        reset
    }

    /// Run the step pipeline on one sample, and the raise detector when
    /// `detect_raise` is set (display off).
    pub fn process(&mut self, sample: &AccelSample, detect_raise: bool) -> TickOutcome {
        let energy = self.filter.update(sample.magnitude_mg());

        let step = self.steps.update(energy, sample.timestamp_ms);
        if let Some(event) = step {
            self.cadence.record(event);
            let total = self.daily.increment();
            log::debug!("Step #{} at {} ms (energy {:.1} mg)", total, event.timestamp_ms, energy);
        }

        let activity = self.cadence.activity();
        if activity != self.activity {
            log::info!("Activity: {:?} -> {:?}", self.activity, activity);
            self.activity = activity;
        }

        let raise = detect_raise && self.raise.update(sample);

        self.status.publish(self.daily.step_count(), self.activity);
        TickOutcome { energy, step, raise }
    }
}
