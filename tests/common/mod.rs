//! In-memory collaborators for driving the dispatcher in tests.

#![allow(dead_code)]

use rollclock::calendar::{AlarmTime, Date, Time, Weekday};
use rollclock::config::Config;
use rollclock::events::{AxisSample, EnvironmentReading};
use rollclock::orientation::DisplayMode;
use rollclock::providers::{Accelerometer, Buzzer, DisplayProvider, EnvironmentSensor, Font, InputProvider, RtcProvider};
use rollclock::scheduler::Tick;
use rollclock::{Collaborators, Dispatcher};

// Samples well inside each orientation band.
pub const UPRIGHT: AxisSample = AxisSample::new(0, -2048, 100);
pub const ON_LEFT_SIDE: AxisSample = AxisSample::new(-2048, 0, 100);
pub const UPSIDE_DOWN: AxisSample = AxisSample::new(0, 2048, 100);
pub const ON_RIGHT_SIDE: AxisSample = AxisSample::new(2048, 0, 100);

#[derive(Default)]
pub struct MockAccelerometer {
    pub sample: AxisSample,
    pub sampling: bool,
    pub double_tap: bool,
    pub reads: usize,
}

impl Accelerometer for MockAccelerometer {
    fn begin_sampling(&mut self) {
        self.sampling = true;
    }

    fn read_axes(&mut self) -> AxisSample {
        self.reads += 1;
        self.sample
    }

    fn double_tap_detected(&mut self) -> bool {
        self.double_tap
    }

    fn clear_double_tap(&mut self) {
        self.double_tap = false;
    }
}

#[derive(Default)]
pub struct MockRtc {
    pub time: Time,
    pub date: Date,
    pub weekday: Weekday,
    pub alarm: AlarmTime,
    pub alarm_enabled: Option<bool>,
    pub time_writes: Vec<Time>,
    pub date_writes: Vec<Date>,
    pub alarm_writes: Vec<AlarmTime>,
    pub time_reads: usize,
}

impl RtcProvider for MockRtc {
    fn read_time(&mut self) -> Time {
        self.time_reads += 1;
        self.time
    }

    fn write_time(&mut self, time: Time) {
        self.time = time;
        self.time_writes.push(time);
    }

    fn read_date(&mut self) -> Date {
        self.date
    }

    fn write_date(&mut self, date: Date) {
        self.date = date;
        self.date_writes.push(date);
    }

    fn read_alarm(&mut self) -> AlarmTime {
        self.alarm
    }

    fn write_alarm(&mut self, alarm: AlarmTime) {
        self.alarm = alarm;
        self.alarm_writes.push(alarm);
    }

    fn set_alarm_enabled(&mut self, enabled: bool) {
        self.alarm_enabled = Some(enabled);
    }

    fn read_weekday(&mut self) -> Weekday {
        self.weekday
    }

    fn write_weekday(&mut self, day: u8) {
        if let Some(weekday) = Weekday::new(day) {
            self.weekday = weekday;
        }
    }
}

#[derive(Default)]
pub struct MockEnvironment {
    pub reading: EnvironmentReading,
    pub reads: usize,
}

impl EnvironmentSensor for MockEnvironment {
    fn read_temperature_humidity(&mut self) -> EnvironmentReading {
        self.reads += 1;
        self.reading
    }
}

/// Keeps the text of the frame being built and the last presented frame.
#[derive(Default)]
pub struct RecordingDisplay {
    pub drawing: Vec<(String, DisplayMode)>,
    pub presented: Vec<(String, DisplayMode)>,
    pub inverted: bool,
    pub invert_calls: usize,
    pub frames: usize,
}

impl RecordingDisplay {
    pub fn shows(&self, text: &str) -> bool {
        self.presented.iter().any(|(t, _)| t == text)
    }

    pub fn shows_containing(&self, text: &str) -> bool {
        self.presented.iter().any(|(t, _)| t.contains(text))
    }
}

impl DisplayProvider for RecordingDisplay {
    fn clear(&mut self) {
        self.drawing.clear();
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _font: Font, _scale: u32, orientation: DisplayMode) {
        self.drawing.push((text.to_string(), orientation));
    }

    fn draw_rect(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32) {}

    fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32) {}

    fn invert_region(&mut self, _x0: i32, _x1: i32, _y0: i32, _y1: i32) {}

    fn invert_whole(&mut self, inverted: bool) {
        self.inverted = inverted;
        self.invert_calls += 1;
    }

    fn present(&mut self) {
        self.presented = self.drawing.clone();
        self.frames += 1;
    }
}

#[derive(Default)]
pub struct MockInput {
    pub select_pressed: bool,
    pub next_pressed: bool,
    pub select_held: bool,
    pub next_held: bool,
}

impl InputProvider for MockInput {
    fn select_pressed(&mut self) -> bool {
        core::mem::take(&mut self.select_pressed)
    }

    fn select_held(&mut self) -> bool {
        self.select_held
    }

    fn next_pressed(&mut self) -> bool {
        core::mem::take(&mut self.next_pressed)
    }

    fn next_held(&mut self) -> bool {
        self.next_held
    }
}

#[derive(Default)]
pub struct MockBuzzer {
    pub frequency: Option<u32>,
    pub sounding: bool,
    pub starts: usize,
}

impl Buzzer for MockBuzzer {
    fn set_tone_frequency(&mut self, hz: u32) {
        self.frequency = Some(hz);
    }

    fn start(&mut self) {
        self.sounding = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.sounding = false;
    }
}

pub type TestDispatcher =
    Dispatcher<MockAccelerometer, MockRtc, MockEnvironment, RecordingDisplay, MockInput, MockBuzzer>;

pub fn time(h: u8, m: u8, s: u8) -> Time {
    Time::new(h, m, s).unwrap()
}

/// An RTC reading 23:59:55 on Wednesday 31-12-98, alarm at 07:00:00.
pub fn rtc() -> MockRtc {
    MockRtc {
        time: time(23, 59, 55),
        date: Date::new(31, 12, 98).unwrap(),
        weekday: Weekday::new(3).unwrap(),
        alarm: time(7, 0, 0),
        ..MockRtc::default()
    }
}

pub fn dispatcher_with(rtc: MockRtc, config: &Config, now: Tick) -> TestDispatcher {
    let hw = Collaborators {
        accelerometer: MockAccelerometer {
            sample: UPRIGHT,
            ..MockAccelerometer::default()
        },
        rtc,
        environment: MockEnvironment::default(),
        display: RecordingDisplay::default(),
        input: MockInput::default(),
        buzzer: MockBuzzer::default(),
    };
    Dispatcher::new(hw, config, now)
}

pub fn dispatcher(rtc: MockRtc) -> TestDispatcher {
    dispatcher_with(rtc, &Config::default(), 0)
}

pub fn press_select(d: &mut TestDispatcher, now: Tick) {
    d.collaborators_mut().input.select_pressed = true;
    d.step(now);
}

pub fn press_next(d: &mut TestDispatcher, now: Tick) {
    d.collaborators_mut().input.next_pressed = true;
    d.step(now);
}

pub fn tilt(d: &mut TestDispatcher, sample: AxisSample) {
    d.collaborators_mut().accelerometer.sample = sample;
}
