// Wristsense - Hardware Capabilities
//
// The sensing engine only talks to hardware through these traits.  The
// firmware binary implements them on top of ESP-IDF; tests supply fakes.

use std::time::Duration;

/// Accelerometer with a built-in wake-on-motion interrupt.
pub trait Imu {
    /// Probe the device and configure output data rate and range.
    fn init(&mut self) -> anyhow::Result<()>;

    /// Read one acceleration triple in milli-g.
    fn read_accel(&mut self) -> anyhow::Result<(i32, i32, i32)>;

    /// Arm the hardware motion interrupt.  Calling it while armed is allowed.
    fn enable_wake_on_motion(&mut self, threshold: u8) -> anyhow::Result<()>;

    /// Disarm the hardware motion interrupt.  Calling it while disarmed is allowed.
    fn disable_wake_on_motion(&mut self) -> anyhow::Result<()>;
}

/// Display panel power state, owned by the display subsystem.
pub trait DisplayPower {
    fn is_on(&self) -> bool;
    /// Request the off → on transition (no-op when already on).
    fn wake(&self);
}

/// Monotonic and wall-clock time.
pub trait Clock {
    /// Milliseconds since boot; wraps at ~49 days, compare with `wrapping_sub`.
    fn uptime_ms(&self) -> u32;
    fn now_local(&self) -> LocalTime;
}

/// Receiving side of the wake-on-motion interrupt handshake.
pub trait WakeSource {
    /// Block until the interrupt fires or `timeout` elapses.  Returns `true`
    /// when woken by the interrupt.
    fn wait(&mut self, timeout: Duration) -> bool;
}

impl<W: WakeSource + ?Sized> WakeSource for Box<W> {
    fn wait(&mut self, timeout: Duration) -> bool {
        (**self).wait(timeout)
    }
}

// ---------------------------------------------------------------------------
// Local wall-clock time
// ---------------------------------------------------------------------------

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LocalTime {
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self { year, month, day, hour, minute, second }
    }

    /// Seconds from 1970-01-01 00:00 to the start of this local day, counted
    /// in the local calendar.  Only the date fields matter.
    pub fn midnight_epoch(&self) -> i64 {
        days_from_civil(self.year as i64, self.month as i64, self.day as i64) * SECS_PER_DAY
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_is_zero() {
        assert_eq!(LocalTime::new(1970, 1, 1, 12, 30, 0).midnight_epoch(), 0);
    }

    #[test]
    fn midnight_ignores_time_of_day() {
        let morning = LocalTime::new(2024, 3, 10, 0, 0, 1);
        let evening = LocalTime::new(2024, 3, 10, 23, 59, 59);
        assert_eq!(morning.midnight_epoch(), evening.midnight_epoch());
        // 2024-03-10 is day 19792 since the epoch.
        assert_eq!(morning.midnight_epoch(), 19_792 * SECS_PER_DAY);
    }

    #[test]
    fn leap_day_and_year_boundaries() {
        let feb28 = LocalTime::new(2024, 2, 28, 0, 0, 0).midnight_epoch();
        let feb29 = LocalTime::new(2024, 2, 29, 0, 0, 0).midnight_epoch();
        let mar1 = LocalTime::new(2024, 3, 1, 0, 0, 0).midnight_epoch();
        assert_eq!(feb29 - feb28, SECS_PER_DAY);
        assert_eq!(mar1 - feb29, SECS_PER_DAY);

        let dec31 = LocalTime::new(2023, 12, 31, 0, 0, 0).midnight_epoch();
        let jan1 = LocalTime::new(2024, 1, 1, 0, 0, 0).midnight_epoch();
        assert_eq!(jan1 - dec31, SECS_PER_DAY);
    }
}
