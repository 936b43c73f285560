// Wristsense - Display Power State
//
// Shared on/off flag for the display panel plus the inactivity timer that
// turns it off.  The panel driver itself lives outside this crate; it reads
// this state and follows it.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::hal::{Clock, DisplayPower};

pub struct DisplayState<C> {
    on: AtomicBool,
    last_activity_ms: AtomicU32,
    clock: C,
}

impl<C: Clock> DisplayState<C> {
    /// Display starts on with the activity timer at the current uptime.
    pub fn new(clock: C) -> Self {
        Self {
            on: AtomicBool::new(true),
            last_activity_ms: AtomicU32::new(clock.uptime_ms()),
            clock,
        }
    }

    /// Record user interaction (touch, button) to postpone the timeout.
    pub fn touch(&self) {
        self.last_activity_ms.store(self.clock.uptime_ms(), Ordering::Relaxed);
    }

    pub fn turn_on(&self) {
        if !self.on.swap(true, Ordering::AcqRel) {
            log::info!("Turning display on");
        }
        self.touch();
    }

    pub fn turn_off(&self) {
        if self.on.swap(false, Ordering::AcqRel) {
            log::info!("Turning display off");
        }
    }

    /// Turn the display off once it has been idle for `timeout_ms`.  Returns
    /// `true` on the on → off transition.
    pub fn expire(&self, timeout_ms: u32) -> bool {
        if !self.on.load(Ordering::Acquire) {
            return false;
        }
        let idle = self.clock.uptime_ms().wrapping_sub(self.last_activity_ms.load(Ordering::Relaxed));
        if idle < timeout_ms {
            return false;
        }
        log::info!("Display idle for {} ms", idle);
        self.turn_off();
        true
    }
}

impl<C: Clock> DisplayPower for DisplayState<C> {
    fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    fn wake(&self) {
        self.turn_on();
    }
}

impl<D: DisplayPower + ?Sized> DisplayPower for Arc<D> {
    fn is_on(&self) -> bool {
        (**self).is_on()
    }

    fn wake(&self) {
        (**self).wake()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::LocalTime;

    #[derive(Clone, Default)]
    struct ManualClock(Arc<AtomicU32>);

    impl ManualClock {
        fn set(&self, ms: u32) {
            self.0.store(ms, Ordering::Relaxed);
        }
    }

    impl Clock for ManualClock {
        fn uptime_ms(&self) -> u32 {
            self.0.load(Ordering::Relaxed)
        }

        fn now_local(&self) -> LocalTime {
            LocalTime::new(2024, 5, 10, 9, 0, 0)
        }
    }

    #[test]
    fn inactivity_timeout_and_wake() {
        let clock = ManualClock::default();
        clock.set(1000);
        let display = Arc::new(DisplayState::new(clock.clone()));
        assert!(display.is_on());

        clock.set(10_000);
        assert!(!display.expire(15_000));
        display.touch();

        clock.set(24_000);
        assert!(!display.expire(15_000));
        clock.set(25_000);
        assert!(display.expire(15_000));
        assert!(!display.is_on());
        assert!(!display.expire(15_000));

        display.wake();
        assert!(display.is_on());
        clock.set(39_999);
        assert!(!display.expire(15_000));
        clock.set(40_000);
        assert!(display.expire(15_000));
    }

    #[test]
    fn timeout_survives_uptime_wrap() {
        let clock = ManualClock::default();
        clock.set(u32::MAX - 5_000);
        let display = DisplayState::new(clock.clone());

        clock.set(9_000);
        assert!(!display.expire(15_000));
        clock.set(10_000);
        assert!(display.expire(15_000));
    }
}
