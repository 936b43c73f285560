// Wristsense - Wake-on-Motion Handshake
//
// `WakeOnMotion` tracks whether the IMU motion interrupt is armed so it is
// toggled once per display transition.  `WakeLatch` is the binary signal the
// interrupt releases and the sensing task waits on.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use crate::hal::{Imu, WakeSource};

#[derive(Debug)]
pub struct WakeOnMotion {
    threshold: u8,
    enabled: bool,
}

impl WakeOnMotion {
    pub fn new(threshold: u8) -> Self {
        Self { threshold, enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Arm the interrupt unless it already is.  A driver error is logged and
    /// the state still flips so the bus is not retried every tick.
    pub fn arm<I: Imu>(&mut self, imu: &mut I) {
        if self.enabled {
            return;
        }
        match imu.enable_wake_on_motion(self.threshold) {
            Ok(()) => log::info!("Wake-on-motion armed (threshold {} LSB)", self.threshold),
            Err(e) => log::warn!("Wake-on-motion arm failed: {}", e),
        }
        self.enabled = true;
    }

    pub fn disarm<I: Imu>(&mut self, imu: &mut I) {
        if !self.enabled {
            return;
        }
        match imu.disable_wake_on_motion() {
            Ok(()) => log::info!("Wake-on-motion disarmed"),
            Err(e) => log::warn!("Wake-on-motion disarm failed: {}", e),
        }
        self.enabled = false;
    }
}

// ---------------------------------------------------------------------------
// Binary semaphore for hosted builds
// ---------------------------------------------------------------------------

/// Single-slot wake signal.  Repeated releases before a `wait` collapse
/// into one.
#[derive(Debug, Default)]
pub struct WakeLatch {
    pending: Mutex<bool>,
    cond: Condvar,
}

impl WakeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&self) {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.cond.notify_one();
    }

    /// Consume a pending release without blocking.
    pub fn try_take(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *pending, false)
    }

    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut pending, _) = self
            .cond
            .wait_timeout_while(pending, timeout, |pending| !*pending)
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *pending, false)
    }
}

impl WakeSource for Arc<WakeLatch> {
    fn wait(&mut self, timeout: Duration) -> bool {
        self.wait_timeout(timeout)
    }
}
