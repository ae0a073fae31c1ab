// Roll Clock — AM2320 Temperature/Humidity Driver
//
// The sensor sleeps between reads and NACKs the first transfer that wakes it.
// A read is: wake, request 4 registers from 0x00, wait, read 8 bytes
// (function code, count, humidity, temperature, CRC).

use std::thread;
use std::time::Duration;

use rollclock::config::{I2C_ADDR_AM2320, I2C_TIMEOUT_TICKS};
use rollclock::events::EnvironmentReading;
use rollclock::providers::EnvironmentSensor;

use super::{with_bus, SharedBus};

const CMD_READ_REGISTERS: u8 = 0x03;
const REG_HUMIDITY_HIGH: u8 = 0x00;
const REGISTER_COUNT: u8 = 4;

/// Temperature is sign-magnitude, not two's complement.
fn decode_temperature(raw: u16) -> f32 {
    let magnitude = (raw & 0x7FFF) as f32 / 10.0;
    if raw & 0x8000 != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// CRC-16/MODBUS over the function code, count and data bytes.
fn crc16(bytes: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in bytes {
        crc ^= byte as u16;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xA001 } else { crc >> 1 };
        }
    }
    crc
}

pub struct Am2320 {
    bus: SharedBus,
    last: EnvironmentReading,
}

impl Am2320 {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            last: EnvironmentReading::default(),
        }
    }

    pub fn read_data(&self) -> anyhow::Result<EnvironmentReading> {
        // Wake-up write is expected to fail.
        let _ = with_bus(self.bus, |bus| bus.write(I2C_ADDR_AM2320, &[0x00], I2C_TIMEOUT_TICKS));
        thread::sleep(Duration::from_millis(1));

        with_bus(self.bus, |bus| {
            bus.write(
                I2C_ADDR_AM2320,
                &[CMD_READ_REGISTERS, REG_HUMIDITY_HIGH, REGISTER_COUNT],
                I2C_TIMEOUT_TICKS,
            )
        })?;
        thread::sleep(Duration::from_millis(2));

        let mut raw = [0u8; 8];
        with_bus(self.bus, |bus| bus.read(I2C_ADDR_AM2320, &mut raw, I2C_TIMEOUT_TICKS))?;

        let crc = u16::from_le_bytes([raw[6], raw[7]]);
        if crc != crc16(&raw[..6]) {
            anyhow::bail!("AM2320 CRC mismatch");
        }

        Ok(EnvironmentReading {
            relative_humidity: u16::from_be_bytes([raw[2], raw[3]]) as f32 / 10.0,
            celsius: decode_temperature(u16::from_be_bytes([raw[4], raw[5]])),
        })
    }
}

impl EnvironmentSensor for Am2320 {
    fn read_temperature_humidity(&mut self) -> EnvironmentReading {
        match self.read_data() {
            Ok(reading) => self.last = reading,
            Err(e) => log::warn!("AM2320 read failed: {}", e),
        }
        self.last
    }
}
