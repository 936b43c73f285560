// Wristsense - Motion Events & Data Types

use crate::config::GRAVITY_MG;

// ---------------------------------------------------------------------------
// Accelerometer Sample (3-axis, milli-g)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccelSample {
    pub ax: i32,
    pub ay: i32,
    pub az: i32,
    /// Monotonic milliseconds since boot (wraps at ~49 days).
    pub timestamp_ms: u32,
}

impl AccelSample {
    pub fn new(ax: i32, ay: i32, az: i32, timestamp_ms: u32) -> Self {
        Self { ax, ay, az, timestamp_ms }
    }

    /// Euclidean magnitude in milli-g.
    pub fn magnitude_mg(&self) -> f32 {
        let (x, y, z) = (self.ax as f32, self.ay as f32, self.az as f32);
        (x * x + y * y + z * z).sqrt()
    }

    /// Rotation about the lateral axis in degrees; positive when the watch
    /// face tilts up towards the wearer.
    pub fn pitch_deg(&self) -> f32 {
        let ax_g = self.ax as f32 / GRAVITY_MG;
        let ay_g = self.ay as f32 / GRAVITY_MG;
        let az_g = self.az as f32 / GRAVITY_MG;
        (-ax_g).atan2((ay_g * ay_g + az_g * az_g).sqrt()).to_degrees()
    }
}

// ---------------------------------------------------------------------------
// Step Event
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEvent {
    pub timestamp_ms: u32,
}

// ---------------------------------------------------------------------------
// Activity Classification
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ActivityState {
    #[default]
    Idle = 0,
    Walk = 1,
    Run = 2,
    Other = 3,
}

impl ActivityState {
    /// Label shown on the steps screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle  => "Idle",
            Self::Walk  => "Walk",
            Self::Run   => "Run",
            Self::Other => "Active",
        }
    }

    /// Inverse of `as u8`; unknown values fall back to `Idle`.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Walk,
            2 => Self::Run,
            3 => Self::Other,
            _ => Self::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_watch_has_zero_pitch_and_unit_gravity() {
        let s = AccelSample::new(0, 0, 1000, 0);
        assert!((s.magnitude_mg() - 1000.0).abs() < 0.01);
        assert!(s.pitch_deg().abs() < 0.01);
    }

    #[test]
    fn negative_x_gravity_pitches_up() {
        let s = AccelSample::new(-1000, 0, 0, 0);
        assert!((s.pitch_deg() - 90.0).abs() < 0.01);

        let s = AccelSample::new(500, 0, 866, 0);
        assert!((s.pitch_deg() + 30.0).abs() < 0.1);
    }

    #[test]
    fn activity_survives_u8_round_trip() {
        for state in [ActivityState::Idle, ActivityState::Walk, ActivityState::Run, ActivityState::Other] {
            assert_eq!(ActivityState::from_u8(state as u8), state);
        }
        assert_eq!(ActivityState::from_u8(42), ActivityState::Idle);
        assert_eq!(ActivityState::Other.label(), "Active");
    }
}
