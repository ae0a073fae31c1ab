// Roll Clock — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up the shared I2C bus (ADXL343, MCP7940N, AM2320).
//   2. Bring up SPI and initialise the SH1106 OLED.
//   3. Configure the buzzer PWM and the two buttons.
//   4. Probe the sensors, arm double-tap, start the RTC oscillator.
//   5. Run the control loop forever.
//
// Everything after boot happens in one cooperative loop: sample buttons,
// step the dispatcher, yield.

mod drivers;

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyIOPin, IOPin, OutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
use esp_idf_hal::prelude::*;
use esp_idf_hal::spi::config::{Config as SpiConfig, DriverConfig};
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver};

use rollclock::config::*;
use rollclock::providers::TickSource;
use rollclock::{Collaborators, Dispatcher};

use crate::drivers::adxl343::Adxl343;
use crate::drivers::am2320::Am2320;
use crate::drivers::buttons::Buttons;
use crate::drivers::buzzer::PiezoBuzzer;
use crate::drivers::mcp7940n::Mcp7940n;
use crate::drivers::sh1106::Sh1106;
use crate::drivers::ticks::EspTicks;
use crate::drivers::SharedBus;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------
fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Roll clock firmware starting…");

    let peripherals = Peripherals::take()?;
    let ticks = EspTicks;

    // ---- I2C bus (shared between ADXL343, MCP7940N and AM2320) ------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // The bus lives for the whole programme (embedded firmware never exits).
    let i2c_bus: SharedBus = Box::leak(Box::new(Mutex::new(i2c)));

    // ---- OLED on SPI2 -----------------------------------------------------
    let spi = SpiDriver::new(
        peripherals.spi2,
        peripherals.pins.gpio8,  // SCLK
        peripherals.pins.gpio10, // MOSI
        Option::<AnyIOPin>::None,
        &DriverConfig::new(),
    )?;
    let spi = SpiDeviceDriver::new(
        spi,
        Some(peripherals.pins.gpio21), // CS
        &SpiConfig::new().baudrate(SPI_BAUDRATE_MHZ.MHz().into()),
    )?;
    let dc = PinDriver::output(peripherals.pins.gpio20.downgrade_output())?;
    let mut display = Sh1106::new(spi, dc);
    display.init()?;

    // ---- Buzzer (LEDC timer 0 / channel 0) --------------------------------
    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new().frequency(BUZZER_FREQUENCY_HZ.Hz().into()),
    )?;
    // Dropping the timer driver would stop the timer.
    let timer = Box::leak(Box::new(timer));
    let channel = LedcDriver::new(peripherals.ledc.channel0, &*timer, peripherals.pins.gpio5)?;
    let buzzer = PiezoBuzzer::new(channel);

    // ---- Buttons ----------------------------------------------------------
    let select = PinDriver::input(peripherals.pins.gpio3.downgrade())?;
    let next = PinDriver::input(peripherals.pins.gpio4.downgrade())?;
    let buttons = Buttons::new(select, next, ticks.now())?;

    // ---- Sensors / RTC self-test -----------------------------------------
    let accelerometer = Adxl343::new(i2c_bus);
    if !accelerometer.is_connected() {
        // Continue anyway so we can still debug via serial.
        log::error!("ADXL343 not found at 0x{:02X}", I2C_ADDR_ADXL343);
    }
    if let Err(e) = accelerometer.enable_double_tap() {
        log::error!("ADXL343 double tap setup failed: {}", e);
    }

    let rtc = Mcp7940n::new(i2c_bus);
    if let Err(e) = rtc.init() {
        log::error!("MCP7940N init failed: {}", e);
    }

    let environment = Am2320::new(i2c_bus);

    // ---- Control loop -----------------------------------------------------
    let config = Config::default();
    let hw = Collaborators {
        accelerometer,
        rtc,
        environment,
        display,
        input: buttons,
        buzzer,
    };
    let mut dispatcher = Dispatcher::new(hw, &config, ticks.now());
    log::info!("Boot complete — entering control loop");

    loop {
        let now = ticks.now();
        dispatcher.collaborators_mut().input.sample(now);
        dispatcher.step(now);
        // Yield so the idle task can feed the watchdog.
        thread::sleep(Duration::from_millis(LOOP_IDLE_MS));
    }
}
