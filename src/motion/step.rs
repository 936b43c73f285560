// Wristsense - Step Detector
//
// Thresholded peak detector with hysteresis and a step-timing gate.

use crate::events::StepEvent;

use super::MotionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakState {
    ReadyForPeak,
    WaitingForFall,
}

#[derive(Debug, Clone)]
pub struct StepDetector {
    threshold: f32,
    min_interval_ms: u32,
    max_interval_ms: u32,
    state: PeakState,
    /// Timing reference: last accepted step, or the peak that restarted a bout.
    last_step_ms: Option<u32>,
}

impl StepDetector {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            threshold: config.step_threshold_mg,
            min_interval_ms: config.step_min_interval_ms,
            max_interval_ms: config.step_max_interval_ms,
            state: PeakState::ReadyForPeak,
            last_step_ms: None,
        }
    }

    pub fn state(&self) -> PeakState {
        self.state
    }

    /// Feed the smoothed motion energy for one tick.
    pub fn update(&mut self, energy: f32, now_ms: u32) -> Option<StepEvent> {
        match self.state {
            PeakState::ReadyForPeak => {
                if energy <= self.threshold {
                    return None;
                }
                match self.last_step_ms.map(|last| now_ms.wrapping_sub(last)) {
                    // Same footfall still ringing; stay armed for a later tick.
                    Some(dt) if dt < self.min_interval_ms => None,
                    Some(dt) if dt > self.max_interval_ms => {
                        log::debug!("Step peak after {} ms pause - restarting bout", dt);
                        self.last_step_ms = Some(now_ms);
                        self.state = PeakState::WaitingForFall;
                        None
                    }
                    _ => {
                        self.last_step_ms = Some(now_ms);
                        self.state = PeakState::WaitingForFall;
                        Some(StepEvent { timestamp_ms: now_ms })
                    }
                }
            }
            PeakState::WaitingForFall => {
                if energy < self.threshold * 0.5 {
                    self.state = PeakState::ReadyForPeak;
                }
                None
            }
        }
    }
}
