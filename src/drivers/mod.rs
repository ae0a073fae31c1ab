// Roll Clock — Peripheral Drivers
//
// Register-level drivers for the clock's peripherals. Each one implements a
// collaborator trait from `rollclock::providers`. I2C chips share one bus
// behind a mutex.

pub mod adxl343;
pub mod am2320;
pub mod buttons;
pub mod buzzer;
pub mod mcp7940n;
pub mod sh1106;
pub mod ticks;

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;
use esp_idf_sys::EspError;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

/// Run `f` with the bus locked.
pub fn with_bus<T>(
    bus: SharedBus,
    f: impl FnOnce(&mut I2cDriver<'static>) -> Result<T, EspError>,
) -> anyhow::Result<T> {
    let mut guard = bus
        .lock()
        .map_err(|_| anyhow::anyhow!("I2C bus lock poisoned"))?;
    Ok(f(&mut *guard)?)
}
