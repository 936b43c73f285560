// Wristsense - Sensor Task
//
// Owns the IMU and the motion engine.  Samples at ~50 Hz while the display
// is on and drops to ~25 Hz (or waits on the IMU interrupt) while it is off.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use esp_idf_hal::gpio::AnyInputPin;

use wristsense::display::DisplayState;
use wristsense::engine::MotionStatus;
use wristsense::hal::WakeSource;
use wristsense::wake::WakeLatch;
use wristsense::{LowPowerStrategy, Scheduler, SchedulerConfig};

use crate::drivers::clock::EspClock;
use crate::drivers::imu_irq::ImuInterrupt;
use crate::drivers::qmi8658::{Qmi8658, SharedBus};

pub fn sensor_task(
    bus: SharedBus,
    irq_pin: AnyInputPin,
    display: Arc<DisplayState<EspClock>>,
    status_tx: Sender<Arc<MotionStatus>>,
) -> ! {
    log::info!("Sensor task started");

    let imu = Qmi8658::new(bus);

    // The interrupt is only waited on under `interrupt-wait`; without a
    // working GPIO the latch simply never releases and waits time out.
    let wake_source: Box<dyn WakeSource> = match ImuInterrupt::new(irq_pin) {
        Ok(irq) => Box::new(irq),
        Err(e) => {
            log::warn!("IMU interrupt unavailable: {}", e);
            Box::new(Arc::new(WakeLatch::new()))
        }
    };

    let config = SchedulerConfig {
        strategy: if cfg!(feature = "interrupt-wait") {
            LowPowerStrategy::InterruptWait
        } else {
            LowPowerStrategy::ReducedRate
        },
        ..SchedulerConfig::default()
    };

    let scheduler = Scheduler::new(imu, display, EspClock, wake_source, config);
    if status_tx.send(scheduler.status()).is_err() {
        log::warn!("Status channel closed - step count will not be reported");
    }
    scheduler.run()
}
