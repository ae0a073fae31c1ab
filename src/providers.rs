// Roll Clock — Hardware Collaborators
//
// The control loop only talks to hardware through these traits. Firmware
// drivers implement them over I2C/SPI/GPIO; the integration tests implement
// them in memory.
//
// None of the calls can fail from the loop's point of view. A driver that
// cannot reach its chip logs the error and hands back its last good value.

use crate::calendar::{AlarmTime, Date, Time, Weekday};
use crate::events::{AxisSample, EnvironmentReading};
use crate::orientation::DisplayMode;
use crate::scheduler::Tick;

pub trait Accelerometer {
    fn begin_sampling(&mut self);
    fn read_axes(&mut self) -> AxisSample;

    /// Latched double-tap interrupt, used to silence the alarm.
    fn double_tap_detected(&mut self) -> bool {
        false
    }

    fn clear_double_tap(&mut self) {}
}

pub trait RtcProvider {
    fn read_time(&mut self) -> Time;
    fn write_time(&mut self, time: Time);
    fn read_date(&mut self) -> Date;
    fn write_date(&mut self, date: Date);
    fn read_alarm(&mut self) -> AlarmTime;
    fn write_alarm(&mut self, alarm: AlarmTime);
    fn set_alarm_enabled(&mut self, enabled: bool);
    fn read_weekday(&mut self) -> Weekday;

    /// 1 = Monday … 7 = Sunday. Anything else is ignored.
    fn write_weekday(&mut self, day: u8);
}

pub trait EnvironmentSensor {
    fn read_temperature_humidity(&mut self) -> EnvironmentReading;
}

/// Glyph sizes. Each maps to a fixed bitmap font; `scale` multiplies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Small,
    Medium,
    Large,
}

/// Coordinates are in the logical space of `orientation` for text and in
/// physical panel space for everything else.
pub trait DisplayProvider {
    fn clear(&mut self);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: Font, scale: u32, orientation: DisplayMode);
    fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    /// Flip every pixel in `x0..x1` × `y0..y1`.
    fn invert_region(&mut self, x0: i32, x1: i32, y0: i32, y1: i32);
    fn invert_whole(&mut self, inverted: bool);
    fn present(&mut self);
}

/// Debounced button state. `*_pressed` reports a press edge once and then
/// clears it; `*_held` is the current level.
pub trait InputProvider {
    fn select_pressed(&mut self) -> bool;
    fn select_held(&mut self) -> bool;
    fn next_pressed(&mut self) -> bool;
    fn next_held(&mut self) -> bool;
}

pub trait Buzzer {
    fn set_tone_frequency(&mut self, hz: u32);
    fn start(&mut self);
    fn stop(&mut self);
}

pub trait TickSource {
    fn now(&self) -> Tick;
}
