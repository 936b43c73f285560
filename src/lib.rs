// Wristsense - Always-on Motion Sensing
//
// Step counting, cadence-based activity classification and raise-to-wake
// for a wrist-worn device.  Hardware is reached only through the traits in
// `hal`, so everything here also runs on the host.

pub mod config;
pub mod daily;
pub mod display;
pub mod engine;
pub mod events;
pub mod hal;
pub mod motion;
pub mod scheduler;
pub mod wake;

pub use engine::{MotionEngine, MotionStatus};
pub use events::{AccelSample, ActivityState, StepEvent};
pub use scheduler::{LowPowerStrategy, PowerMode, Scheduler, SchedulerConfig};
