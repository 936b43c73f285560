// Wristsense - Sampling Scheduler
//
// Top-level sensing loop.  Picks the sampling cadence from the display
// power state, arms wake-on-motion while the display is off, and hands each
// sample to the engine.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::*;
use crate::engine::{MotionEngine, MotionStatus};
use crate::events::AccelSample;
use crate::hal::{Clock, DisplayPower, Imu, WakeSource};
use crate::motion::MotionConfig;
use crate::wake::WakeOnMotion;

/// How the scheduler waits while the display is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LowPowerStrategy {
    /// Keep sampling at the reduced rate and watch for the raise gesture.
    #[default]
    ReducedRate,
    /// Block on the IMU motion interrupt; any release wakes the display.
    InterruptWait,
}

/// Current sampling mode; drives the sleep after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    Active,
    LowPower,
    /// IMU never came up; nothing but a coarse sleep from here on.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub active_interval: Duration,
    pub low_power_interval: Duration,
    pub idle_retry_interval: Duration,
    pub wom_wait_timeout: Duration,
    pub wom_threshold: u8,
    pub strategy: LowPowerStrategy,
    pub motion: MotionConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            active_interval: Duration::from_millis(SAMPLE_INTERVAL_ACTIVE_MS),
            low_power_interval: Duration::from_millis(SAMPLE_INTERVAL_LOW_POWER_MS),
            idle_retry_interval: Duration::from_millis(IDLE_RETRY_INTERVAL_MS),
            wom_wait_timeout: Duration::from_millis(WOM_WAIT_TIMEOUT_MS),
            wom_threshold: WOM_THRESHOLD_LSB,
            strategy: LowPowerStrategy::default(),
            motion: MotionConfig::default(),
        }
    }
}

pub struct Scheduler<I, D, C, W> {
    imu: I,
    display: D,
    clock: C,
    wake_source: W,
    config: SchedulerConfig,
    engine: MotionEngine,
    wom: WakeOnMotion,
    mode: PowerMode,
}

impl<I, D, C, W> Scheduler<I, D, C, W>
where
    I: Imu,
    D: DisplayPower,
    C: Clock,
    W: WakeSource,
{
    /// Initialise the IMU.  On failure the scheduler is built in
    /// `PowerMode::Disabled` and never touches the IMU again.
    pub fn new(mut imu: I, display: D, clock: C, wake_source: W, config: SchedulerConfig) -> Self {
        let mode = match imu.init() {
            Ok(()) => PowerMode::Active,
            Err(e) => {
                log::error!("IMU init failed, step counting disabled: {}", e);
                PowerMode::Disabled
            }
        };
        let engine = MotionEngine::new(&config.motion);
        let wom = WakeOnMotion::new(config.wom_threshold);
        Self { imu, display, clock, wake_source, config, engine, wom, mode }
    }

    pub fn mode(&self) -> PowerMode {
        self.mode
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn status(&self) -> Arc<MotionStatus> {
        self.engine.status()
    }

    pub fn wake_on_motion_enabled(&self) -> bool {
        self.wom.is_enabled()
    }

    /// Run one tick and return how long to sleep before the next one.
    pub fn tick(&mut self) -> Duration {
        if self.mode == PowerMode::Disabled {
            return self.config.idle_retry_interval;
        }

        self.engine.roll_over(&self.clock.now_local());

        let display_on = self.display.is_on();
        let changed = self.set_mode(if display_on { PowerMode::Active } else { PowerMode::LowPower });

        let mut detect_raise = !display_on;
        if !display_on && self.config.strategy == LowPowerStrategy::InterruptWait {
            detect_raise = false;
            if changed {
                // Drop a release left over from before the interrupt was armed.
                self.wake_source.wait(Duration::ZERO);
            }
            if self.wake_source.wait(self.config.wom_wait_timeout) {
                log::info!("Wake-on-motion IRQ");
                self.display.wake();
                // Next tick runs with the display on.
                return Duration::ZERO;
            }
        }

        let (ax, ay, az) = match self.imu.read_accel() {
            Ok(reading) => reading,
            Err(e) => {
                log::warn!("IMU read error: {}", e);
                return self.interval();
            }
        };
        let sample = AccelSample::new(ax, ay, az, self.clock.uptime_ms());

        let outcome = self.engine.process(&sample, detect_raise);
        if outcome.raise {
            self.display.wake();
        }

        match (self.mode, self.config.strategy) {
            // The interrupt wait already paced this tick.
            (PowerMode::LowPower, LowPowerStrategy::InterruptWait) => Duration::ZERO,
            _ => self.interval(),
        }
    }

    /// Sensing loop; never returns.
    pub fn run(mut self) -> ! {
        log::info!("Sensing loop started ({:?}, {:?})", self.mode, self.config.strategy);
        loop {
            let tick_start = Instant::now();
            let delay = self.tick();

            // Sleep for the remainder of the interval to hold the cadence.
            let elapsed = tick_start.elapsed();
            if elapsed < delay {
                thread::sleep(delay - elapsed);
            }
        }
    }

    fn interval(&self) -> Duration {
        match self.mode {
            PowerMode::Active => self.config.active_interval,
            PowerMode::LowPower => self.config.low_power_interval,
            PowerMode::Disabled => self.config.idle_retry_interval,
        }
    }

    /// Returns `true` when the mode changed.
    fn set_mode(&mut self, mode: PowerMode) -> bool {
        match mode {
            PowerMode::Active => self.wom.disarm(&mut self.imu),
            PowerMode::LowPower => self.wom.arm(&mut self.imu),
            PowerMode::Disabled => {}
        }
        if mode == self.mode {
            return false;
        }
        log::info!("Sampling mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        true
    }
}
