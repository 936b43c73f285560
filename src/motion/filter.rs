// Wristsense - Gravity-Compensated Energy Filter

use crate::config::GRAVITY_MG;

/// One-pole low-pass over the gravity-removed acceleration magnitude.
#[derive(Debug, Clone)]
pub struct EnergyFilter {
    alpha: f32,
    smoothed: f32,
}

impl EnergyFilter {
    pub fn new(alpha: f32) -> Self {
        Self { alpha: alpha.clamp(0.0, 1.0), smoothed: 0.0 }
    }

    /// Feed one magnitude (mg) and return the updated motion energy.
    pub fn update(&mut self, magnitude_mg: f32) -> f32 {
        let hp = magnitude_mg - GRAVITY_MG;
        self.smoothed = self.alpha * self.smoothed + (1.0 - self.alpha) * hp;
        self.smoothed
    }

    pub fn energy(&self) -> f32 {
        self.smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_watch_stays_near_zero() {
        let mut f = EnergyFilter::new(0.9);
        for _ in 0..50 {
            f.update(1000.0);
        }
        assert!(f.energy().abs() < 1e-3);
    }

    #[test]
    fn first_update_takes_one_tenth_of_the_step() {
        let mut f = EnergyFilter::new(0.9);
        assert!((f.update(1100.0) - 10.0).abs() < 1e-3);
        assert!((f.update(1100.0) - 19.0).abs() < 1e-3);
    }

    #[test]
    fn sustained_offset_converges() {
        let mut f = EnergyFilter::new(0.9);
        for _ in 0..200 {
            f.update(1300.0);
        }
        assert!((f.energy() - 300.0).abs() < 0.5);
    }
}
