// Wristsense - Raise-to-Wake Detector
//
// Compares the current pitch with a sample from roughly half a second ago;
// a large enough upward rotation with a calm magnitude wakes the display.
// Only fed while the display is off, so the history may go stale while the
// display is on and refills once it is needed again.

use heapless::HistoryBuffer;

use crate::config::PITCH_HISTORY_LEN;
use crate::events::AccelSample;

use super::MotionConfig;

#[derive(Debug, Clone, Copy)]
struct PitchSample {
    pitch_deg: f32,
    timestamp_ms: u32,
}

#[derive(Debug)]
pub struct RaiseDetector {
    threshold_deg: f32,
    accel_min_mg: f32,
    accel_max_mg: f32,
    reference_min_age_ms: u32,
    reference_max_age_ms: u32,
    cooldown_ms: u32,
    history: HistoryBuffer<PitchSample, PITCH_HISTORY_LEN>,
    last_raise_ms: Option<u32>,
}

impl RaiseDetector {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            threshold_deg: config.raise_threshold_deg,
            accel_min_mg: config.raise_accel_min_mg,
            accel_max_mg: config.raise_accel_max_mg,
            reference_min_age_ms: config.raise_reference_min_age_ms,
            reference_max_age_ms: config.raise_reference_max_age_ms,
            cooldown_ms: config.raise_cooldown_ms,
            history: HistoryBuffer::new(),
            last_raise_ms: None,
        }
    }

    pub fn last_raise_ms(&self) -> Option<u32> {
        self.last_raise_ms
    }

    /// Feed one raw sample; returns `true` when a raise gesture fires.
    pub fn update(&mut self, sample: &AccelSample) -> bool {
        let now = sample.timestamp_ms;
        let pitch = sample.pitch_deg();
        self.history.write(PitchSample { pitch_deg: pitch, timestamp_ms: now });

        let reference = self.reference_pitch(now).unwrap_or(pitch);
        let dp = pitch - reference;

        let magnitude = sample.magnitude_mg();
        let accel_ok = (self.accel_min_mg..=self.accel_max_mg).contains(&magnitude);
        let cooldown_ok = self
            .last_raise_ms
            .map_or(true, |last| now.wrapping_sub(last) >= self.cooldown_ms);

        if dp > self.threshold_deg && accel_ok && cooldown_ok {
            log::info!("Raise-to-wake: dp={:.1} pitch={:.1} prev={:.1}", dp, pitch, reference);
            self.last_raise_ms = Some(now);
            return true;
        }
        false
    }

    /// Newest buffered pitch whose age falls inside the reference window.
    fn reference_pitch(&self, now: u32) -> Option<f32> {
        let window = self.reference_min_age_ms..=self.reference_max_age_ms;
        self.history
            .oldest_ordered()
            .filter(|s| window.contains(&now.wrapping_sub(s.timestamp_ms)))
            .last()
            .map(|s| s.pitch_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(t: u32) -> AccelSample {
        AccelSample::new(0, 0, 1000, t)
    }

    /// Face tilted 60° towards the wearer, still ~1 g.
    fn raised(t: u32) -> AccelSample {
        AccelSample::new(-866, 0, 500, t)
    }

    fn detector() -> RaiseDetector {
        RaiseDetector::new(&MotionConfig::default())
    }

    #[test]
    fn sixty_degree_raise_fires_once() {
        let mut d = detector();
        assert!(!d.update(&flat(1000)));
        assert!(d.update(&raised(1500)));
        assert_eq!(d.last_raise_ms(), Some(1500));
    }

    #[test]
    fn without_a_reference_sample_nothing_fires() {
        let mut d = detector();
        assert!(!d.update(&raised(1500)));
        // Reference too recent (100 ms) and too old (900 ms).
        let mut d = detector();
        d.update(&flat(1400));
        assert!(!d.update(&raised(1500)));
        let mut d = detector();
        d.update(&flat(600));
        assert!(!d.update(&raised(1500)));
    }

    #[test]
    fn newest_sample_in_window_is_the_reference() {
        let mut d = detector();
        // 650 ms ago the face was already half raised, 450 ms ago it was flat.
        d.update(&AccelSample::new(-500, 0, 866, 1000));
        d.update(&flat(1200));
        assert!(d.update(&raised(1650)));
    }

    #[test]
    fn shaking_or_free_fall_is_ignored() {
        let mut d = detector();
        d.update(&flat(1000));
        assert!(!d.update(&AccelSample::new(-1300, 0, 750, 1500)));
        let mut d = detector();
        d.update(&flat(1000));
        assert!(!d.update(&AccelSample::new(-600, 0, 350, 1500)));
    }

    #[test]
    fn cooldown_suppresses_second_raise() {
        let mut d = detector();
        d.update(&flat(1000));
        assert!(d.update(&raised(1500)));

        d.update(&flat(2500));
        assert!(!d.update(&raised(3000)));

        d.update(&flat(5100));
        assert!(d.update(&raised(5600)));
    }

    #[test]
    fn lowering_the_wrist_never_fires() {
        let mut d = detector();
        d.update(&raised(1000));
        assert!(!d.update(&flat(1500)));
    }
}
