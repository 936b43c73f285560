// Wristsense - Status Task
//
// Stand-in for the steps screen: reports the daily total, goal progress and
// activity while the display is on.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use wristsense::config::*;
use wristsense::display::DisplayState;
use wristsense::engine::MotionStatus;
use wristsense::hal::DisplayPower;

use crate::drivers::clock::EspClock;

pub fn status_task(status_rx: Receiver<Arc<MotionStatus>>, display: Arc<DisplayState<EspClock>>) {
    log::info!("Status task started");

    let status = match status_rx.recv() {
        Ok(status) => status,
        Err(_) => {
            log::warn!("Sensor task exited before publishing status - exiting status task");
            return;
        }
    };

    let interval = Duration::from_millis(STATUS_REPORT_INTERVAL_MS);

    loop {
        if display.is_on() {
            log::info!(
                "Steps: {} ({}% of {}) Activity: {}",
                status.step_count(),
                status.goal_percent(DEFAULT_STEP_GOAL),
                DEFAULT_STEP_GOAL,
                status.activity().label()
            );
        }
        thread::sleep(interval);
    }
}
