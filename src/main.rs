// Wristsense - Firmware Entry Point
//
// Boot sequence:
//   1. Bring up logging and the shared I2C bus.
//   2. Create the display power state (display starts on).
//   3. Spawn the sensor, power and status tasks.
//
// The sensor task owns the IMU and all motion state; other tasks only read
// the published step count and activity.

#[cfg(target_os = "espidf")]
mod drivers;
#[cfg(target_os = "espidf")]
mod tasks;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{InputPin, PinDriver};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use wristsense::config::*;
    use wristsense::display::DisplayState;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Wristsense firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus (shared with the RTC and touch controller) ---------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio15, // SDA
        peripherals.pins.gpio14, // SCL
        &i2c_config,
    )?;
    // SAFETY: The I2C peripheral is a singleton obtained from `Peripherals::take()`.
    // It will live for the entire programme duration (embedded firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> =
        Box::leak(Box::new(Mutex::new(unsafe { core::mem::transmute(i2c) })));

    // ---- Wake button (pull-up, active LOW) --------------------------------
    let button = PinDriver::input(peripherals.pins.gpio0.downgrade_input())?;
    // SAFETY: plain register write on a pin owned by `button`.
    unsafe {
        esp_idf_sys::gpio_set_pull_mode(PIN_BUTTON, esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY);
    }

    let irq_pin = peripherals.pins.gpio21.downgrade_input();

    // ---- Shared state -----------------------------------------------------
    let display = Arc::new(DisplayState::new(drivers::clock::EspClock));
    let (status_tx, status_rx) = mpsc::channel();

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ---------------

    // Sensor task - tightest timing, owns the IMU.
    let sensor_display = Arc::clone(&display);
    thread::Builder::new()
        .name("sensor".into())
        .stack_size(STACK_SENSOR)
        .spawn(move || {
            tasks::sensor::sensor_task(i2c_bus, irq_pin, sensor_display, status_tx);
        })?;

    // Display power task (inactivity timeout + wake button)
    let power_display = Arc::clone(&display);
    thread::Builder::new()
        .name("power".into())
        .stack_size(STACK_POWER)
        .spawn(move || {
            tasks::power::power_task(button, power_display);
        })?;

    // Status reporting task
    let status_display = Arc::clone(&display);
    thread::Builder::new()
        .name("status".into())
        .stack_size(STACK_STATUS)
        .spawn(move || {
            tasks::status::status_task(status_rx, status_display);
        })?;

    // Main thread has nothing left to do - park it forever.
    // (All work happens in the spawned FreeRTOS tasks.)
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("wristsense: the firmware entry point only runs on ESP-IDF targets; run `cargo test` for the host build");
}
