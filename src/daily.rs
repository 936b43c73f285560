// Wristsense - Daily Step Counter
//
// RAM-only step total that resets when local midnight advances.

use crate::hal::LocalTime;

#[derive(Debug, Clone, Default)]
pub struct DailyCounter {
    step_count: u32,
    last_midnight_epoch: Option<i64>,
}

impl DailyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn increment(&mut self) -> u32 {
        self.step_count = self.step_count.saturating_add(1);
        self.step_count
    }

    /// Reset the count if `now` lies in a later local day than the last
    /// check.  The first call only records the current day.  Returns `true`
    /// when the counter was reset.
    pub fn roll_over(&mut self, now: &LocalTime) -> bool {
        let midnight = now.midnight_epoch();
        match self.last_midnight_epoch {
            Some(last) if midnight > last => {
                log::info!(
                    "Daily step counter reset at midnight ({} steps, {} day(s) elapsed)",
                    self.step_count,
                    (midnight - last) / 86_400
                );
                self.last_midnight_epoch = Some(midnight);
                self.step_count = 0;
                true
            }
            Some(_) => false,
            None => {
                self.last_midnight_epoch = Some(midnight);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u8, hour: u8) -> LocalTime {
        LocalTime::new(2024, 5, day, hour, 0, 0)
    }

    #[test]
    fn first_check_only_records_the_day() {
        let mut c = DailyCounter::new();
        c.increment();
        assert!(!c.roll_over(&at(10, 9)));
        assert_eq!(c.step_count(), 1);
    }

    #[test]
    fn resets_once_after_midnight() {
        let mut c = DailyCounter::new();
        c.roll_over(&at(10, 23));
        for _ in 0..500 {
            c.increment();
        }
        assert!(!c.roll_over(&at(10, 23)));
        assert!(c.roll_over(&at(11, 0)));
        assert_eq!(c.step_count(), 0);

        c.increment();
        assert!(!c.roll_over(&at(11, 12)));
        assert_eq!(c.step_count(), 1);
    }

    #[test]
    fn several_midnights_between_checks_reset_once() {
        let mut c = DailyCounter::new();
        c.roll_over(&at(10, 8));
        c.increment();
        c.increment();

        assert!(c.roll_over(&at(13, 8)));
        assert_eq!(c.step_count(), 0);
        c.increment();
        assert!(!c.roll_over(&at(13, 9)));
        assert!(!c.roll_over(&at(13, 23)));
        assert_eq!(c.step_count(), 1);

        assert!(c.roll_over(&at(14, 0)));
    }

    #[test]
    fn clock_going_backwards_keeps_the_count() {
        let mut c = DailyCounter::new();
        c.roll_over(&at(10, 8));
        c.increment();
        assert!(!c.roll_over(&at(9, 8)));
        assert_eq!(c.step_count(), 1);
        // Back on the original day: still no reset.
        assert!(!c.roll_over(&at(10, 9)));
    }
}
