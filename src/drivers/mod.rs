pub mod clock;
pub mod imu_irq;
pub mod qmi8658;
