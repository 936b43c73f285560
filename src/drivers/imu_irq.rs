// Wristsense - IMU Interrupt Wake Source
//
// The QMI8658 INT1 line (active LOW) releases a FreeRTOS task notification
// from the GPIO ISR.  No sensor work happens in interrupt context.

use std::num::NonZeroU32;
use std::time::Duration;

use esp_idf_hal::delay::TickType;
use esp_idf_hal::gpio::{AnyInputPin, Input, InterruptType, PinDriver};
use esp_idf_hal::task::notification::Notification;

use wristsense::config::PIN_IMU_IRQ;
use wristsense::hal::WakeSource;

pub struct ImuInterrupt {
    pin: PinDriver<'static, AnyInputPin, Input>,
    notification: Notification,
}

impl ImuInterrupt {
    /// Must be created on the task that will `wait` on it.
    pub fn new(pin: AnyInputPin) -> anyhow::Result<Self> {
        let mut pin = PinDriver::input(pin)?;
        // SAFETY: plain register write on a pin this driver owns.
        unsafe {
            esp_idf_sys::gpio_set_pull_mode(PIN_IMU_IRQ, esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY);
        }
        // Falling edge only, level changes from noise would storm the ISR.
        pin.set_interrupt_type(InterruptType::NegEdge)?;

        let notification = Notification::new();
        let notifier = notification.notifier();
        let isr = move || {
            // SAFETY: runs in ISR context, which is what the notifier is for.
            unsafe {
                let _ = notifier.notify_and_yield(NonZeroU32::MIN);
            }
        };
        // SAFETY: the callback does not allocate, block or touch sensor state.
        unsafe {
            pin.subscribe(isr)?;
        }
        pin.enable_interrupt()?;

        log::info!("IMU wake interrupt on GPIO{}", PIN_IMU_IRQ);
        Ok(Self { pin, notification })
    }
}

impl WakeSource for ImuInterrupt {
    fn wait(&mut self, timeout: Duration) -> bool {
        let woke = self.notification.wait(TickType::from(timeout).ticks()).is_some();
        if woke {
            // The GPIO driver disables the interrupt after each trigger.
            if let Err(e) = self.pin.enable_interrupt() {
                log::warn!("IMU interrupt re-enable failed: {}", e);
            }
        }
        woke
    }
}
