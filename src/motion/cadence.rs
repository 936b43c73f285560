// Wristsense - Cadence Classifier
//
// Keeps the most recent step timestamps and derives the activity from the
// step rate across them.

use heapless::HistoryBuffer;

use crate::config::*;
use crate::events::{ActivityState, StepEvent};

#[derive(Debug)]
pub struct CadenceClassifier {
    steps: HistoryBuffer<u32, CADENCE_HISTORY_LEN>,
}

impl CadenceClassifier {
    pub fn new() -> Self {
        Self { steps: HistoryBuffer::new() }
    }

    pub fn record(&mut self, step: StepEvent) {
        self.steps.write(step.timestamp_ms);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.len() == 0
    }

    /// Steps per minute across the buffered history, `None` with fewer than
    /// two steps.  A zero span yields 0.
    pub fn steps_per_minute(&self) -> Option<f32> {
        let count = self.steps.len();
        if count < 2 {
            return None;
        }
        let oldest = *self.steps.oldest_ordered().next()?;
        let newest = *self.steps.recent()?;
        let span_ms = newest.wrapping_sub(oldest);
        if span_ms == 0 {
            return Some(0.0);
        }
        Some(60_000.0 * (count - 1) as f32 / span_ms as f32)
    }

    pub fn activity(&self) -> ActivityState {
        match self.steps_per_minute() {
            Some(spm) => classify(spm),
            None => ActivityState::Idle,
        }
    }
}

impl Default for CadenceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed cadence bands; no hysteresis.
pub fn classify(spm: f32) -> ActivityState {
    if spm > CADENCE_RUN_SPM {
        ActivityState::Run
    } else if spm > CADENCE_WALK_SPM {
        ActivityState::Walk
    } else if spm > CADENCE_OTHER_SPM {
        ActivityState::Other
    } else {
        ActivityState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_steps(interval_ms: u32, count: u32) -> CadenceClassifier {
        let mut c = CadenceClassifier::new();
        for i in 0..count {
            c.record(StepEvent { timestamp_ms: 10_000 + i * interval_ms });
        }
        c
    }

    #[test]
    fn sparse_history_is_idle() {
        assert_eq!(CadenceClassifier::new().activity(), ActivityState::Idle);
        assert_eq!(with_steps(500, 1).activity(), ActivityState::Idle);
        assert_eq!(with_steps(500, 1).steps_per_minute(), None);
    }

    #[test]
    fn constant_interval_converges_to_60000_over_t() {
        for interval in [300u32, 400, 500, 750, 1000, 1500] {
            let expected = 60_000.0 / interval as f32;
            for count in 2..=12 {
                let spm = with_steps(interval, count).steps_per_minute().unwrap();
                assert!((spm - expected).abs() < 0.01, "T={} n={} spm={}", interval, count, spm);
            }
        }
    }

    #[test]
    fn buffer_keeps_only_the_last_eight() {
        let c = with_steps(500, 20);
        assert_eq!(c.len(), CADENCE_HISTORY_LEN);
        assert!(!c.is_empty());
    }

    #[test]
    fn zero_span_is_guarded() {
        let mut c = CadenceClassifier::new();
        c.record(StepEvent { timestamp_ms: 42 });
        c.record(StepEvent { timestamp_ms: 42 });
        assert_eq!(c.steps_per_minute(), Some(0.0));
        assert_eq!(c.activity(), ActivityState::Idle);
    }

    #[test]
    fn cadence_bands() {
        assert_eq!(with_steps(400, 8).activity(), ActivityState::Run);   // 150 spm
        assert_eq!(with_steps(500, 8).activity(), ActivityState::Walk);  // 120 spm
        assert_eq!(with_steps(1500, 8).activity(), ActivityState::Other); // 40 spm
        assert_eq!(classify(130.0), ActivityState::Walk);
        assert_eq!(classify(60.0), ActivityState::Other);
        assert_eq!(classify(10.0), ActivityState::Idle);
    }
}
