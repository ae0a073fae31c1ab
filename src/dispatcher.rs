// Roll Clock — Mode Dispatcher
//
// The body of the control loop. Each `step`:
//   1. refreshes orientation when its slot is due;
//   2. reads the RTC time, and refreshes the snapshot unless a digit edit
//      is open (the alarm keeps watching the RTC either way);
//   3. runs the behaviour of the face that is up and draws it;
//   4. checks the alarm;
//   5. applies the alarm blink and buzzer, then presents the frame.
//
// The dispatcher is the single owner of all control state. Hardware is only
// reached through the collaborator traits.

use crate::alarm::AlarmEngine;
use crate::calendar::{ClockSnapshot, Time};
use crate::config::{Config, HOLD_DELAY_MS};
use crate::events::{Button, EnvironmentReading};
use crate::input::HoldRepeat;
use crate::orientation::{DisplayMode, OrientationClassifier};
use crate::providers::{Accelerometer, Buzzer, DisplayProvider, EnvironmentSensor, InputProvider, RtcProvider};
use crate::scheduler::{Scheduler, Task, Tick};
use crate::screens;
use crate::settings::{Commit, MenuItem, SettingsMachine, SettingsState};

/// Everything the loop drives.
pub struct Collaborators<A, R, E, D, I, B> {
    pub accelerometer: A,
    pub rtc: R,
    pub environment: E,
    pub display: D,
    pub input: I,
    pub buzzer: B,
}

pub struct Dispatcher<A, R, E, D, I, B> {
    hw: Collaborators<A, R, E, D, I, B>,
    scheduler: Scheduler,
    orientation: OrientationClassifier,
    settings: SettingsMachine,
    alarm: AlarmEngine,
    // Last RTC time, updated even while the snapshot is frozen
    clock: Time,
    // Alarm second in which the alarm was last dismissed
    dismissed_at: Option<Time>,
    snapshot: ClockSnapshot,
    environment: Option<EnvironmentReading>,

    // Hold-to-repeat per button
    select_hold: HoldRepeat,
    next_hold: HoldRepeat,

    // Alarm blink output
    inverted: bool,
    buzzing: bool,
}

impl<A, R, E, D, I, B> Dispatcher<A, R, E, D, I, B>
where
    A: Accelerometer,
    R: RtcProvider,
    E: EnvironmentSensor,
    D: DisplayProvider,
    I: InputProvider,
    B: Buzzer,
{
    pub fn new(mut hw: Collaborators<A, R, E, D, I, B>, config: &Config, now: Tick) -> Self {
        hw.accelerometer.begin_sampling();
        hw.buzzer.set_tone_frequency(config.buzzer_hz);
        hw.buzzer.stop();
        hw.rtc.set_alarm_enabled(config.alarm_enabled);

        let mut dispatcher = Self {
            hw,
            scheduler: Scheduler::new(config.intervals, now),
            orientation: OrientationClassifier::new(config.thresholds),
            settings: SettingsMachine::new(),
            alarm: AlarmEngine::new(config.alarm_enabled),
            clock: Time::default(),
            dismissed_at: None,
            snapshot: ClockSnapshot::default(),
            environment: None,
            select_hold: HoldRepeat::new(HOLD_DELAY_MS),
            next_hold: HoldRepeat::new(HOLD_DELAY_MS),
            inverted: false,
            buzzing: false,
        };
        dispatcher.refresh_snapshot();
        log::info!(
            "Control loop ready: {} {} alarm {} ({})",
            dispatcher.snapshot.date,
            dispatcher.snapshot.time,
            dispatcher.snapshot.alarm,
            if config.alarm_enabled { "on" } else { "off" }
        );
        dispatcher
    }

    /// One pass of the control loop. Never blocks.
    pub fn step(&mut self, now: Tick) {
        self.update_orientation(now);
        self.update_clock(now);

        // Presses are read-and-clear: drain them every pass so nothing queued
        // on another face fires when the clock face comes back.
        let buttons = self.read_buttons(now);

        self.hw.display.clear();
        match self.orientation.mode() {
            DisplayMode::Normal => self.run_clock_face(buttons),
            DisplayMode::RotatedCcw90 => self.run_environment(now),
            mode @ (DisplayMode::UpsideDown | DisplayMode::RotatedCw90) => {
                screens::label(&mut self.hw.display, mode)
            }
        }

        self.check_alarm();
        self.apply_blink(now);
        self.hw.display.present();
    }

    // -----------------------------------------------------------------------
    // Orientation / clock
    // -----------------------------------------------------------------------

    fn update_orientation(&mut self, now: Tick) {
        if !self.scheduler.poll(Task::Orientation, now) {
            return;
        }
        let previous = self.orientation.mode();
        let sample = self.hw.accelerometer.read_axes();
        let mode = self.orientation.update(sample);
        if mode == previous {
            return;
        }

        if previous == DisplayMode::Normal {
            self.settings.cancel();
        }
        if mode == DisplayMode::RotatedCcw90 {
            // Show a fresh reading as soon as the face comes up.
            self.scheduler.rearm(Task::Environment, now);
        }
    }

    fn update_clock(&mut self, now: Tick) {
        if !self.scheduler.poll(Task::RtcRefresh, now) {
            return;
        }
        let time = self.hw.rtc.read_time();
        self.clock = time;
        if self.settings.is_editing() {
            return;
        }
        // Date and weekday only change when the time goes backwards
        // (midnight, or someone set the clock).
        if time < self.snapshot.time {
            self.snapshot.date = self.hw.rtc.read_date();
            self.snapshot.weekday = self.hw.rtc.read_weekday();
        }
        self.snapshot.time = time;
    }

    fn refresh_snapshot(&mut self) {
        self.clock = self.hw.rtc.read_time();
        self.snapshot = ClockSnapshot {
            time: self.clock,
            date: self.hw.rtc.read_date(),
            weekday: self.hw.rtc.read_weekday(),
            alarm: self.hw.rtc.read_alarm(),
        };
    }

    // -----------------------------------------------------------------------
    // Faces
    // -----------------------------------------------------------------------

    fn read_buttons(&mut self, now: Tick) -> [Option<Button>; 2] {
        let select_repeat = self.select_hold.update(self.hw.input.select_held(), now);
        let next_repeat = self.next_hold.update(self.hw.input.next_held(), now);
        let repeat = (select_repeat || next_repeat) && self.scheduler.poll(Task::ButtonRepeat, now);

        let select = self.hw.input.select_pressed() || (select_repeat && repeat);
        let next = self.hw.input.next_pressed() || (next_repeat && repeat);
        [select.then_some(Button::Select), next.then_some(Button::Next)]
    }

    fn run_clock_face(&mut self, buttons: [Option<Button>; 2]) {
        for button in buttons.into_iter().flatten() {
            if let Some(commit) = self.settings.handle(button, &self.snapshot) {
                self.write_commit(commit);
            }
        }
        self.settings.apply_pending();

        let display = &mut self.hw.display;
        match self.settings.state() {
            SettingsState::Idle => screens::clock_face(display, &self.snapshot, self.alarm.is_enabled()),
            SettingsState::MenuRoot { highlighted } => screens::menu(display, *highlighted),
            SettingsState::EditTime(session) => screens::editor(display, MenuItem::Time, session),
            SettingsState::EditDate(session) => screens::editor(display, MenuItem::Date, session),
            SettingsState::EditAlarm(session) => screens::editor(display, MenuItem::Alarm, session),
        }
    }

    fn write_commit(&mut self, commit: Commit) {
        match commit {
            Commit::Time(time) => self.hw.rtc.write_time(time),
            Commit::Date(date) => self.hw.rtc.write_date(date),
            Commit::Alarm(alarm) => self.hw.rtc.write_alarm(alarm),
        }
        self.refresh_snapshot();
    }

    fn run_environment(&mut self, now: Tick) {
        if self.scheduler.poll(Task::Environment, now) {
            let reading = self.hw.environment.read_temperature_humidity();
            log::debug!("{:.1} C {:.1} %RH", reading.celsius, reading.relative_humidity);
            self.environment = Some(reading);
        }
        screens::environment(&mut self.hw.display, self.environment.as_ref());
    }

    // -----------------------------------------------------------------------
    // Alarm
    // -----------------------------------------------------------------------

    fn check_alarm(&mut self) {
        let current = self.clock;
        // A dismissal holds until the clock leaves the alarm second.
        if self.dismissed_at.is_some_and(|t| t != current) {
            self.dismissed_at = None;
        }
        if self.dismissed_at.is_none() {
            self.alarm.check_match(&current, &self.snapshot.alarm);
        }
        if !self.alarm.is_active() {
            return;
        }
        if !self.settings.is_idle() {
            log::info!("Alarm interrupted settings");
            self.settings.cancel();
        }
        if self.hw.accelerometer.double_tap_detected() {
            self.hw.accelerometer.clear_double_tap();
            self.alarm.deactivate();
            self.dismissed_at = Some(current);
        }
    }

    fn apply_blink(&mut self, now: Tick) {
        if self.alarm.is_active() {
            if self.scheduler.poll(Task::AlarmBlink, now) {
                self.inverted = !self.inverted;
                self.hw.display.invert_whole(self.inverted);
            }
        } else if self.inverted {
            self.inverted = false;
            self.hw.display.invert_whole(false);
        }

        // The buzzer sounds exactly while the screen is inverted.
        if self.inverted != self.buzzing {
            self.buzzing = self.inverted;
            if self.buzzing {
                self.hw.buzzer.start();
            } else {
                self.hw.buzzer.stop();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn display_mode(&self) -> DisplayMode {
        self.orientation.mode()
    }

    pub fn settings(&self) -> &SettingsMachine {
        &self.settings
    }

    pub fn alarm(&self) -> &AlarmEngine {
        &self.alarm
    }

    /// Turn the alarm on or off, on the RTC and in the engine.
    pub fn set_alarm_enabled(&mut self, enabled: bool) {
        self.hw.rtc.set_alarm_enabled(enabled);
        self.alarm.set_enabled(enabled);
    }

    pub fn snapshot(&self) -> &ClockSnapshot {
        &self.snapshot
    }

    pub fn environment(&self) -> Option<&EnvironmentReading> {
        self.environment.as_ref()
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn collaborators(&self) -> &Collaborators<A, R, E, D, I, B> {
        &self.hw
    }

    pub fn collaborators_mut(&mut self) -> &mut Collaborators<A, R, E, D, I, B> {
        &mut self.hw
    }
}
