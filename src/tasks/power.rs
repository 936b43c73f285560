// Wristsense - Display Power Task
//
// Turns the display off after a period of inactivity and back on when the
// user presses the wake button.  Raise-to-wake requests arrive through the
// same `DisplayState` from the sensor task.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

use wristsense::config::*;
use wristsense::display::DisplayState;
use wristsense::hal::DisplayPower;

use crate::drivers::clock::EspClock;

pub fn power_task(button: PinDriver<'static, AnyInputPin, Input>, display: Arc<DisplayState<EspClock>>) -> ! {
    log::info!("Power task started");

    let poll_interval = Duration::from_millis(DISPLAY_POLL_INTERVAL_MS);

    loop {
        // ---- Inactivity timeout ----
        display.expire(DISPLAY_TIMEOUT_MS);

        // ---- Wake button (active LOW with pull-up) ----
        if button.is_low() {
            if display.is_on() {
                display.touch();
            } else {
                display.wake();
            }
            thread::sleep(Duration::from_millis(BUTTON_WAKE_HOLDOFF_MS));
        }

        thread::sleep(poll_interval);
    }
}
