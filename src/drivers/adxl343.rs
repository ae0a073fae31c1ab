// Roll Clock — ADXL343 Accelerometer Driver
//
// Register-level driver over the shared I2C bus. Samples are left-justified
// ±16 g counts, which is the scale the orientation thresholds are tuned for.

use rollclock::config::{I2C_ADDR_ADXL343, I2C_TIMEOUT_TICKS};
use rollclock::events::AxisSample;
use rollclock::providers::Accelerometer;

use super::{with_bus, SharedBus};

// ADXL343 register addresses
const REG_DEVID: u8 = 0x00;
const REG_THRESH_TAP: u8 = 0x1D;
const REG_DUR: u8 = 0x21;
const REG_LATENT: u8 = 0x22;
const REG_WINDOW: u8 = 0x23;
const REG_TAP_AXES: u8 = 0x2A;
const REG_BW_RATE: u8 = 0x2C;
const REG_POWER_CTL: u8 = 0x2D;
const REG_INT_ENABLE: u8 = 0x2E;
const REG_INT_SOURCE: u8 = 0x30;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32; // Start of 6-byte axis burst
const REG_FIFO_CTL: u8 = 0x38;
const DEVID_EXPECTED: u8 = 0xE5;

const INT_DOUBLE_TAP: u8 = 0x20;

pub struct Adxl343 {
    bus: SharedBus,
    last: AxisSample,
}

impl Adxl343 {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            last: AxisSample::default(),
        }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut buf = [0u8; 1];
        match with_bus(self.bus, |bus| {
            bus.write_read(I2C_ADDR_ADXL343, &[REG_DEVID], &mut buf, I2C_TIMEOUT_TICKS)
        }) {
            Ok(()) => buf[0] == DEVID_EXPECTED,
            Err(_) => false,
        }
    }

    /// 800 Hz output rate, measurement mode, ±16 g left-justified, FIFO bypassed.
    pub fn init(&self) -> anyhow::Result<()> {
        self.write_registers(&[
            (REG_BW_RATE, 0x0D),
            (REG_POWER_CTL, 0x08),
            (REG_DATA_FORMAT, 0x07),
            (REG_FIFO_CTL, 0x00),
        ])?;
        log::info!("ADXL343 initialised (±16g, 800Hz)");
        Ok(())
    }

    /// Arm the double-tap interrupt: 3 g threshold, 10 ms max tap,
    /// 100 ms latency, 250 ms window, all axes.
    pub fn enable_double_tap(&self) -> anyhow::Result<()> {
        self.write_registers(&[
            (REG_THRESH_TAP, 0x30),
            (REG_DUR, 0x10),
            (REG_LATENT, 0x50),
            (REG_WINDOW, 0xC8),
            (REG_TAP_AXES, 0x07),
            (REG_INT_ENABLE, INT_DOUBLE_TAP),
        ])?;
        log::info!("ADXL343 double tap armed");
        Ok(())
    }

    pub fn read_data(&self) -> anyhow::Result<AxisSample> {
        let mut raw = [0u8; 6];
        with_bus(self.bus, |bus| {
            bus.write_read(I2C_ADDR_ADXL343, &[REG_DATAX0], &mut raw, I2C_TIMEOUT_TICKS)
        })?;

        Ok(AxisSample::new(
            i16::from_le_bytes([raw[0], raw[1]]) as i32,
            i16::from_le_bytes([raw[2], raw[3]]) as i32,
            i16::from_le_bytes([raw[4], raw[5]]) as i32,
        ))
    }

    /// Reading INT_SOURCE also clears the latched interrupt bits.
    fn read_int_source(&self) -> anyhow::Result<u8> {
        let mut buf = [0u8; 1];
        with_bus(self.bus, |bus| {
            bus.write_read(I2C_ADDR_ADXL343, &[REG_INT_SOURCE], &mut buf, I2C_TIMEOUT_TICKS)
        })?;
        Ok(buf[0])
    }

    fn write_registers(&self, writes: &[(u8, u8)]) -> anyhow::Result<()> {
        with_bus(self.bus, |bus| {
            for &(reg, value) in writes {
                bus.write(I2C_ADDR_ADXL343, &[reg, value], I2C_TIMEOUT_TICKS)?;
            }
            Ok(())
        })
    }
}

impl Accelerometer for Adxl343 {
    fn begin_sampling(&mut self) {
        if let Err(e) = self.init() {
            log::error!("ADXL343 init failed: {}", e);
        }
    }

    fn read_axes(&mut self) -> AxisSample {
        match self.read_data() {
            Ok(sample) => self.last = sample,
            Err(e) => log::warn!("ADXL343 read failed: {}", e),
        }
        self.last
    }

    fn double_tap_detected(&mut self) -> bool {
        match self.read_int_source() {
            Ok(source) => source & INT_DOUBLE_TAP != 0,
            Err(e) => {
                log::warn!("ADXL343 INT_SOURCE read failed: {}", e);
                false
            }
        }
    }

    fn clear_double_tap(&mut self) {
        if let Err(e) = self.read_int_source() {
            log::warn!("ADXL343 INT_SOURCE clear failed: {}", e);
        }
    }
}
