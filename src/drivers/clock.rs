// Wristsense - System Clock
//
// Monotonic milliseconds from the ESP timer and local time from newlib
// (kept in sync by the RTC / BLE time sync outside this firmware core).

use wristsense::hal::{Clock, LocalTime};

/// Milliseconds since boot (wraps at ~49 days - fine for timeouts).
fn now_ms() -> u32 {
    unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EspClock;

impl Clock for EspClock {
    fn uptime_ms(&self) -> u32 {
        now_ms()
    }

    fn now_local(&self) -> LocalTime {
        // SAFETY: `time` and `localtime_r` only write into the locals passed in.
        let tm = unsafe {
            let now = esp_idf_sys::time(core::ptr::null_mut());
            let mut tm: esp_idf_sys::tm = core::mem::zeroed();
            esp_idf_sys::localtime_r(&now, &mut tm);
            tm
        };
        LocalTime::new(
            tm.tm_year + 1900,
            (tm.tm_mon + 1) as u8,
            tm.tm_mday as u8,
            tm.tm_hour as u8,
            tm.tm_min as u8,
            tm.tm_sec as u8,
        )
    }
}
