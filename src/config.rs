// Roll Clock — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

use crate::orientation::Thresholds;
use crate::scheduler::{ScheduleIntervals, Tick};

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_BUTTON_SELECT: i32 = 3; // D1 — Select button (pull-down, active HIGH)
pub const PIN_BUTTON_NEXT: i32 = 4;   // D2 — Next button (pull-down, active HIGH)
pub const PIN_BUZZER: i32 = 5;        // D3 — Piezo buzzer (LEDC PWM)
pub const PIN_I2C_SDA: i32 = 6;       // D4 — I2C data line
pub const PIN_I2C_SCL: i32 = 7;       // D5 — I2C clock line
pub const PIN_SPI_SCLK: i32 = 8;      // D8 — OLED clock
pub const PIN_SPI_MOSI: i32 = 10;     // D10 — OLED data
pub const PIN_OLED_DC: i32 = 20;      // D7 — OLED data/command select
pub const PIN_OLED_CS: i32 = 21;      // D6 — OLED chip select

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_ADXL343: u8 = 0x53; // ALT ADDRESS pin low
pub const I2C_ADDR_MCP7940N: u8 = 0x6F;
pub const I2C_ADDR_AM2320: u8 = 0x5C;
pub const I2C_BAUDRATE_KHZ: u32 = 100; // AM2320 will not go faster
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (SH1106 OLED, 132-column controller driving a 128x64 glass)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024
pub const SH1106_COLUMN_OFFSET: u8 = 2;
pub const SPI_BAUDRATE_MHZ: u32 = 8;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const ORIENTATION_INTERVAL_MS: Tick = 813;   // Accelerometer poll
pub const RTC_REFRESH_INTERVAL_MS: Tick = 3;     // Time snapshot refresh
pub const ENVIRONMENT_INTERVAL_MS: Tick = 20_000; // AM2320 wants >2 s between reads
pub const ALARM_BLINK_INTERVAL_MS: Tick = 500;   // Invert/buzzer toggle while alarm is active
pub const DEBOUNCE_MS: Tick = 50;
pub const HOLD_DELAY_MS: Tick = 500;             // Held button starts repeating after this
pub const HOLD_REPEAT_MS: Tick = 200;            // ... and then repeats at this rate
pub const LOOP_IDLE_MS: u64 = 1;                 // Yield between control-loop passes

// ---------------------------------------------------------------------------
// Orientation (raw ADXL343 counts, left-justified ±16 g)
// ---------------------------------------------------------------------------
pub const AXIS_ACTIVE: i32 = 1400;
pub const AXIS_INACTIVE: i32 = 500;

// ---------------------------------------------------------------------------
// Alarm / Buzzer
// ---------------------------------------------------------------------------
pub const BUZZER_FREQUENCY_HZ: u32 = 444;
pub const BUZZER_DUTY_PERCENT: u32 = 50;
pub const ALARM_ENABLED_AT_BOOT: bool = true;

/// Tunables the control loop is built with. `Default` uses the constants
/// above; tests construct their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub intervals: ScheduleIntervals,
    pub thresholds: Thresholds,
    pub buzzer_hz: u32,
    pub alarm_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intervals: ScheduleIntervals {
                orientation: ORIENTATION_INTERVAL_MS,
                rtc_refresh: RTC_REFRESH_INTERVAL_MS,
                alarm_blink: ALARM_BLINK_INTERVAL_MS,
                environment: ENVIRONMENT_INTERVAL_MS,
                button_repeat: HOLD_REPEAT_MS,
            },
            thresholds: Thresholds {
                active: AXIS_ACTIVE,
                inactive: AXIS_INACTIVE,
            },
            buzzer_hz: BUZZER_FREQUENCY_HZ,
            alarm_enabled: ALARM_ENABLED_AT_BOOT,
        }
    }
}
