// Wristsense - QMI8658 IMU Driver
//
// Register-level accelerometer driver over the shared I2C bus.  Only what
// the sensing engine needs: accel-only bring-up, milli-g reads and the
// wake-on-motion engine.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail};
use esp_idf_hal::i2c::I2cDriver;

use wristsense::config::*;
use wristsense::hal::Imu;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// QMI8658 register addresses
const REG_WHO_AM_I: u8 = 0x00;
const REG_CTRL1: u8 = 0x02; // serial interface & INT enables
const REG_CTRL2: u8 = 0x03; // accel range / ODR
const REG_CTRL7: u8 = 0x08; // sensor enables
const REG_CTRL8: u8 = 0x09; // motion / handshake routing
const REG_CTRL9: u8 = 0x0A; // host command
const REG_CAL1_L: u8 = 0x0B;
const REG_CAL1_H: u8 = 0x0C;
const REG_STATUSINT: u8 = 0x2D;
const REG_AX_L: u8 = 0x35; // Start of 6-byte accel burst
const WHO_AM_I_EXPECTED: u8 = 0x05;

const CTRL1_ADDR_AI: u8 = 0x40;       // register auto-increment
const CTRL1_INT1_EN: u8 = 0x08;
const CTRL2_ACCEL_4G_62HZ: u8 = 0x17; // aFS = ±4 g, aODR = 62.5 Hz
const CTRL7_ACCEL_EN: u8 = 0x01;
const CTRL8_HANDSHAKE_STATUSINT: u8 = 0x80; // CmdDone → STATUSINT.7, keeps INT1 quiet
const CAL1_H_INT1_HIGH: u8 = 0b10 << 6;     // WoM on INT1, idle high, no blanking
const STATUSINT_CMD_DONE: u8 = 0x80;
const CMD_ACK: u8 = 0x00;
const CMD_WRITE_WOM_SETTING: u8 = 0x08;
const CMD_POLL_ATTEMPTS: u32 = 50;

pub struct Qmi8658 {
    bus: SharedBus,
    address: Option<u8>,
}

impl Qmi8658 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus, address: None }
    }

    fn address(&self) -> anyhow::Result<u8> {
        self.address.ok_or_else(|| anyhow!("QMI8658 not initialised"))
    }

    fn write_reg(&self, reg: u8, value: u8) -> anyhow::Result<()> {
        let addr = self.address()?;
        let mut bus = self.bus.lock().map_err(|_| anyhow!("I2C bus mutex poisoned"))?;
        bus.write(addr, &[reg, value], I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    fn read_regs(&self, reg: u8, buf: &mut [u8]) -> anyhow::Result<()> {
        let addr = self.address()?;
        let mut bus = self.bus.lock().map_err(|_| anyhow!("I2C bus mutex poisoned"))?;
        bus.write_read(addr, &[reg], buf, I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    /// Check whether a QMI8658 answers at `addr`.
    fn probe(&self, addr: u8) -> bool {
        let Ok(mut bus) = self.bus.lock() else {
            return false;
        };
        let mut buf = [0u8; 1];
        match bus.write_read(addr, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Issue a CTRL9 host command and complete the CmdDone/ACK handshake.
    fn command(&self, cmd: u8) -> anyhow::Result<()> {
        self.write_reg(REG_CTRL9, cmd)?;
        let mut status = [0u8; 1];
        for _ in 0..CMD_POLL_ATTEMPTS {
            self.read_regs(REG_STATUSINT, &mut status)?;
            if status[0] & STATUSINT_CMD_DONE != 0 {
                return self.write_reg(REG_CTRL9, CMD_ACK);
            }
            thread::sleep(Duration::from_millis(1));
        }
        bail!("QMI8658 command 0x{:02X} timed out", cmd)
    }

    fn write_wom_setting(&self, threshold_mg: u8) -> anyhow::Result<()> {
        // WoM settings may only change with the sensors stopped.
        self.write_reg(REG_CTRL7, 0x00)?;
        self.write_reg(REG_CAL1_L, threshold_mg)?;
        self.write_reg(REG_CAL1_H, CAL1_H_INT1_HIGH)?;
        self.command(CMD_WRITE_WOM_SETTING)?;
        self.write_reg(REG_CTRL7, CTRL7_ACCEL_EN)
    }
}

impl Imu for Qmi8658 {
    /// Find the device on either address and configure accel-only ±4 g at
    /// 62.5 Hz.
    fn init(&mut self) -> anyhow::Result<()> {
        let addr = [I2C_ADDR_QMI8658_HIGH, I2C_ADDR_QMI8658_LOW]
            .into_iter()
            .find(|&addr| self.probe(addr))
            .ok_or_else(|| anyhow!("QMI8658 not found at 0x{:02X} or 0x{:02X}", I2C_ADDR_QMI8658_HIGH, I2C_ADDR_QMI8658_LOW))?;
        self.address = Some(addr);

        self.write_reg(REG_CTRL7, 0x00)?;
        self.write_reg(REG_CTRL1, CTRL1_ADDR_AI | CTRL1_INT1_EN)?;
        self.write_reg(REG_CTRL8, CTRL8_HANDSHAKE_STATUSINT)?;
        self.write_reg(REG_CTRL2, CTRL2_ACCEL_4G_62HZ)?;
        self.write_reg(REG_CTRL7, CTRL7_ACCEL_EN)?;

        log::info!("QMI8658 initialised at 0x{:02X} (accel only, ±4g, 62.5Hz)", addr);
        Ok(())
    }

    /// Burst-read the accelerometer and convert to milli-g.
    fn read_accel(&mut self) -> anyhow::Result<(i32, i32, i32)> {
        let mut raw = [0u8; 6];
        self.read_regs(REG_AX_L, &mut raw)?;

        let to_mg = |lo: u8, hi: u8| i16::from_le_bytes([lo, hi]) as i32 * 1000 / ACCEL_LSB_PER_G_4G;
        Ok((to_mg(raw[0], raw[1]), to_mg(raw[2], raw[3]), to_mg(raw[4], raw[5])))
    }

    fn enable_wake_on_motion(&mut self, threshold: u8) -> anyhow::Result<()> {
        self.write_wom_setting(threshold)
    }

    /// A zero threshold switches the WoM engine off.
    fn disable_wake_on_motion(&mut self) -> anyhow::Result<()> {
        self.write_wom_setting(0)
    }
}
