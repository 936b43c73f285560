// Wristsense - Hardware & System Configuration
// Target: ESP32-S3 wrist board with a QMI8658 IMU on the shared I2C bus

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 0;      // BOOT key - wakes the display (active LOW)
pub const PIN_I2C_SDA: i32 = 15;    // I2C data line
pub const PIN_I2C_SCL: i32 = 14;    // I2C clock line
pub const PIN_IMU_IRQ: i32 = 21;    // QMI8658 INT1 - wake-on-motion (active LOW)

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_QMI8658_HIGH: u8 = 0x6B; // SA0 pulled high
pub const I2C_ADDR_QMI8658_LOW: u8 = 0x6A;  // SA0 pulled low
pub const I2C_TIMEOUT_TICKS: u32 = 1000;    // FreeRTOS ticks
pub const I2C_BAUDRATE_KHZ: u32 = 400;

// ---------------------------------------------------------------------------
// QMI8658 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_LSB_PER_G_4G: i32 = 8192; // LSB/g at ±4 g

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SENSOR: usize = 4096;
pub const STACK_POWER: usize = 4096;
pub const STACK_STATUS: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const SAMPLE_INTERVAL_ACTIVE_MS: u64 = 20;      // ~50 Hz with the display on
pub const SAMPLE_INTERVAL_LOW_POWER_MS: u64 = 40;   // ~25 Hz with the display off
pub const IDLE_RETRY_INTERVAL_MS: u64 = 1000;       // IMU missing - coarse idle loop
pub const WOM_WAIT_TIMEOUT_MS: u64 = 1000;          // bounded wait on the WoM signal
pub const DISPLAY_POLL_INTERVAL_MS: u64 = 50;
pub const DISPLAY_TIMEOUT_MS: u32 = 15_000;         // inactivity → display off
pub const BUTTON_WAKE_HOLDOFF_MS: u64 = 100;
pub const STATUS_REPORT_INTERVAL_MS: u64 = 5000;

// ---------------------------------------------------------------------------
// Motion Filter & Step Detection
// ---------------------------------------------------------------------------
pub const GRAVITY_MG: f32 = 1000.0;
pub const ENERGY_SMOOTHING_ALPHA: f32 = 0.90;
pub const STEP_THRESHOLD_MG: f32 = 80.0;
pub const STEP_MIN_INTERVAL_MS: u32 = 280;          // refractory period
pub const STEP_MAX_INTERVAL_MS: u32 = 2000;         // longer gap = new walking bout

// ---------------------------------------------------------------------------
// Cadence Classification (steps per minute)
// ---------------------------------------------------------------------------
pub const CADENCE_HISTORY_LEN: usize = 8;
pub const CADENCE_RUN_SPM: f32 = 130.0;
pub const CADENCE_WALK_SPM: f32 = 60.0;
pub const CADENCE_OTHER_SPM: f32 = 10.0;

// ---------------------------------------------------------------------------
// Raise-to-Wake
// ---------------------------------------------------------------------------
pub const PITCH_HISTORY_LEN: usize = 16;
pub const RAISE_REFERENCE_MIN_AGE_MS: u32 = 400;
pub const RAISE_REFERENCE_MAX_AGE_MS: u32 = 700;
pub const RAISE_DP_THRESH_DEG: f32 = 55.0;
pub const RAISE_ACCEL_MIN_MG: f32 = 850.0;
pub const RAISE_ACCEL_MAX_MG: f32 = 1150.0;
pub const RAISE_COOLDOWN_MS: u32 = 3500;

// ---------------------------------------------------------------------------
// Wake-on-Motion
// ---------------------------------------------------------------------------
pub const WOM_THRESHOLD_LSB: u8 = 12; // empirical, a few tens of mg

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------
pub const DEFAULT_STEP_GOAL: u32 = 8000;
