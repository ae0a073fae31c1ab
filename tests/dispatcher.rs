mod common;

use common::*;
use rollclock::calendar::{Date, Weekday};
use rollclock::config::Config;
use rollclock::events::EnvironmentReading;
use rollclock::orientation::DisplayMode;

// ---------------------------------------------------------------------------
// Boot
// ---------------------------------------------------------------------------

#[test]
fn boot_prepares_every_collaborator() {
    let d = dispatcher(rtc());
    let hw = d.collaborators();
    assert!(hw.accelerometer.sampling);
    assert_eq!(hw.buzzer.frequency, Some(444));
    assert!(!hw.buzzer.sounding);
    assert_eq!(hw.rtc.alarm_enabled, Some(true));
    assert!(d.alarm().is_enabled());
    assert_eq!(d.snapshot().time, time(23, 59, 55));
    assert_eq!(d.snapshot().date, Date::new(31, 12, 98).unwrap());
    assert_eq!(d.display_mode(), DisplayMode::Normal);
}

#[test]
fn clock_face_shows_time_date_and_alarm_flag() {
    let mut d = dispatcher(rtc());
    d.step(0);
    let display = &d.collaborators().display;
    assert!(display.shows("23:59:55"));
    assert!(display.shows("Wed 31-12-98"));
    assert!(display.shows("AL"));
    assert_eq!(display.frames, 1);
}

#[test]
fn alarm_disabled_by_config() {
    let mut clock = rtc();
    clock.time = time(7, 0, 0);
    let config = Config {
        alarm_enabled: false,
        ..Config::default()
    };
    let mut d = dispatcher_with(clock, &config, 0);
    d.step(0);
    assert_eq!(d.collaborators().rtc.alarm_enabled, Some(false));
    assert!(!d.alarm().is_active());
    assert!(d.collaborators().display.shows("--"));
}

// ---------------------------------------------------------------------------
// RTC snapshot
// ---------------------------------------------------------------------------

#[test]
fn date_is_reread_when_the_day_rolls_over() {
    let mut clock = rtc();
    clock.time = time(23, 59, 59);
    let mut d = dispatcher(clock);
    d.step(0);

    let hw = d.collaborators_mut();
    hw.rtc.time = time(0, 0, 0);
    hw.rtc.date = Date::new(1, 1, 99).unwrap();
    hw.rtc.weekday = Weekday::new(4).unwrap();
    d.step(10);

    assert_eq!(d.snapshot().time, time(0, 0, 0));
    assert_eq!(d.snapshot().date, Date::new(1, 1, 99).unwrap());
    assert!(d.collaborators().display.shows("Thu 01-01-99"));
}

#[test]
fn snapshot_is_frozen_while_editing() {
    let mut d = dispatcher(rtc());
    press_select(&mut d, 0);
    press_select(&mut d, 10);
    assert!(d.settings().is_editing());

    d.collaborators_mut().rtc.time = time(10, 0, 0);
    for now in [20, 40, 60] {
        d.step(now);
    }
    assert_eq!(d.snapshot().time, time(23, 59, 55));
    assert!(d.collaborators().display.shows("23:59:55"));
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[test]
fn time_edit_commits_through_the_rtc() {
    let mut d = dispatcher(rtc());
    let mut now = 0;
    press_select(&mut d, now);
    assert!(d.collaborators().display.shows("Set Time"));
    now += 10;
    press_select(&mut d, now);
    assert!(d.settings().is_editing());

    for _ in 0..6 {
        now += 10;
        press_next(&mut d, now);
        now += 10;
        press_select(&mut d, now);
    }

    assert_eq!(d.collaborators().rtc.time_writes, vec![time(4, 0, 6)]);
    assert_eq!(d.snapshot().time, time(4, 0, 6));
    assert!(d.settings().is_idle());
    assert!(d.collaborators().display.shows("04:00:06"));
}

#[test]
fn alarm_edit_writes_the_alarm() {
    let mut d = dispatcher(rtc());
    let mut now = 0;
    press_select(&mut d, now);
    for _ in 0..2 {
        now += 10;
        press_next(&mut d, now);
    }
    assert!(d.collaborators().display.shows("Set Alarm"));

    now += 10;
    press_select(&mut d, now);
    assert!(d.collaborators().display.shows("07:00:00"));
    now += 10;
    press_next(&mut d, now); // hour tens 0 -> 1
    for _ in 0..6 {
        now += 10;
        press_select(&mut d, now);
    }

    assert_eq!(d.collaborators().rtc.alarm_writes, vec![time(17, 0, 0)]);
    assert_eq!(d.snapshot().alarm, time(17, 0, 0));
    assert!(d.collaborators().rtc.time_writes.is_empty());
}

#[test]
fn invalid_date_is_not_written() {
    let mut d = dispatcher(rtc());
    let mut now = 0;
    let mut step = |d: &mut TestDispatcher, select: bool| {
        now += 10;
        if select {
            press_select(d, now);
        } else {
            press_next(d, now);
        }
    };

    step(&mut d, true); // menu
    step(&mut d, false); // highlight Date
    step(&mut d, true); // edit 31-12-98, cursor on year tens
    step(&mut d, true);
    step(&mut d, true); // month tens
    step(&mut d, false); // 12 -> 02, day pulled down to 28
    assert!(d.collaborators().display.shows("28-02-98"));
    step(&mut d, true); // month ones
    for _ in 0..8 {
        step(&mut d, false); // 2 -> 9 -> 0
    }
    assert!(d.collaborators().display.shows("28-00-98"));
    for _ in 0..3 {
        step(&mut d, true);
    }

    assert!(d.settings().is_idle());
    assert!(d.collaborators().rtc.date_writes.is_empty());
}

#[test]
fn held_next_repeats_after_the_hold_delay() {
    let mut d = dispatcher(rtc());
    press_select(&mut d, 0);
    press_select(&mut d, 10);

    d.collaborators_mut().input.next_held = true;
    d.step(20);
    d.step(400);
    assert!(d.collaborators().display.shows("23:59:55"));

    // Held for more than 500 ms: first repeat.
    d.step(521);
    assert!(d.collaborators().display.shows("03:59:55"));

    // Repeats are spaced by the repeat interval.
    d.step(600);
    assert!(d.collaborators().display.shows("03:59:55"));
    d.step(722);
    assert!(d.collaborators().display.shows("13:59:55"));

    d.collaborators_mut().input.next_held = false;
    d.step(1_000);
    assert!(d.collaborators().display.shows("13:59:55"));
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

#[test]
fn leaving_the_clock_face_cancels_an_edit() {
    let mut d = dispatcher(rtc());
    d.collaborators_mut().environment.reading = EnvironmentReading {
        celsius: 21.5,
        relative_humidity: 40.0,
    };
    press_select(&mut d, 0);
    press_select(&mut d, 10);
    press_next(&mut d, 20);
    assert!(d.settings().is_editing());

    tilt(&mut d, ON_LEFT_SIDE);
    d.step(820);
    assert_eq!(d.display_mode(), DisplayMode::RotatedCcw90);
    assert!(d.settings().is_idle());

    let display = &d.collaborators().display;
    assert!(display.shows("21.5"));
    assert!(display.shows("40.0"));
    assert!(display
        .presented
        .iter()
        .all(|(_, mode)| *mode == DisplayMode::RotatedCcw90));

    // Back upright: the face, not the abandoned edit.
    tilt(&mut d, UPRIGHT);
    d.step(1_640);
    assert_eq!(d.display_mode(), DisplayMode::Normal);
    assert!(d.settings().is_idle());
    assert!(d.collaborators().rtc.time_writes.is_empty());
    assert!(d.collaborators().display.shows("23:59:55"));
}

#[test]
fn environment_reads_are_throttled() {
    let mut d = dispatcher(rtc());
    tilt(&mut d, ON_LEFT_SIDE);
    d.step(0);
    assert_eq!(d.collaborators().environment.reads, 1);
    assert!(d.environment().is_some());

    d.step(1_000);
    d.step(10_000);
    assert_eq!(d.collaborators().environment.reads, 1);

    d.step(20_500);
    assert_eq!(d.collaborators().environment.reads, 2);
}

#[test]
fn sideways_and_inverted_faces_show_labels() {
    let mut d = dispatcher(rtc());
    tilt(&mut d, UPSIDE_DOWN);
    d.step(0);
    assert_eq!(d.display_mode(), DisplayMode::UpsideDown);
    assert!(d.collaborators().display.shows("Mode C"));

    tilt(&mut d, ON_RIGHT_SIDE);
    d.step(820);
    assert_eq!(d.display_mode(), DisplayMode::RotatedCw90);
    assert!(d.collaborators().display.shows("Mode D"));
}

#[test]
fn ambiguous_tilt_keeps_the_current_face() {
    let mut d = dispatcher(rtc());
    tilt(&mut d, ON_LEFT_SIDE);
    d.step(0);
    // Lying flat.
    tilt(&mut d, rollclock::events::AxisSample::new(0, 0, 2048));
    d.step(820);
    assert_eq!(d.display_mode(), DisplayMode::RotatedCcw90);
}

#[test]
fn presses_on_other_faces_are_dropped() {
    let mut d = dispatcher(rtc());
    tilt(&mut d, ON_LEFT_SIDE);
    d.step(0);
    press_select(&mut d, 10);
    assert!(d.settings().is_idle());

    tilt(&mut d, UPRIGHT);
    d.step(820);
    assert_eq!(d.display_mode(), DisplayMode::Normal);
    assert!(d.settings().is_idle());
}

// ---------------------------------------------------------------------------
// Alarm
// ---------------------------------------------------------------------------

fn ringing() -> TestDispatcher {
    let mut clock = rtc();
    clock.time = time(7, 0, 0);
    let mut d = dispatcher(clock);
    d.step(0);
    d
}

#[test]
fn alarm_blinks_with_the_buzzer() {
    let mut d = ringing();
    assert!(d.alarm().is_active());
    assert!(d.is_inverted());
    assert!(d.collaborators().display.inverted);
    assert!(d.collaborators().buzzer.sounding);

    d.step(200);
    assert!(d.is_inverted());

    d.step(501);
    assert!(!d.is_inverted());
    assert!(!d.collaborators().display.inverted);
    assert!(!d.collaborators().buzzer.sounding);

    d.step(1_002);
    assert!(d.is_inverted());
    assert!(d.collaborators().buzzer.sounding);
    assert_eq!(d.collaborators().buzzer.starts, 2);

    // Latched: the clock moving on does not stop it.
    d.collaborators_mut().rtc.time = time(7, 0, 30);
    d.step(1_100);
    assert!(d.alarm().is_active());
}

#[test]
fn double_tap_silences_the_alarm() {
    let mut d = ringing();
    d.collaborators_mut().accelerometer.double_tap = true;
    d.step(100);

    assert!(!d.alarm().is_active());
    assert!(!d.is_inverted());
    assert!(!d.collaborators().display.inverted);
    assert!(!d.collaborators().buzzer.sounding);
    assert!(!d.collaborators().accelerometer.double_tap);

    // Still inside the alarm second: stays quiet.
    d.step(600);
    assert!(!d.alarm().is_active());
}

#[test]
fn dismissed_alarm_rings_again_once_the_second_has_passed() {
    let mut d = ringing();
    d.collaborators_mut().accelerometer.double_tap = true;
    d.step(100);
    assert!(!d.alarm().is_active());

    d.collaborators_mut().rtc.time = time(7, 0, 1);
    d.step(200);
    assert!(!d.alarm().is_active());

    // Clock set back onto the alarm time.
    d.collaborators_mut().rtc.time = time(7, 0, 0);
    d.step(300);
    assert!(d.alarm().is_active());
}

#[test]
fn double_tap_is_ignored_without_an_alarm() {
    let mut d = dispatcher(rtc());
    d.collaborators_mut().accelerometer.double_tap = true;
    d.step(0);
    assert!(d.collaborators().accelerometer.double_tap);
}

#[test]
fn alarm_closes_the_menu() {
    let mut clock = rtc();
    clock.time = time(6, 59, 59);
    let mut d = dispatcher(clock);
    press_select(&mut d, 0);
    assert!(!d.settings().is_idle());

    d.collaborators_mut().rtc.time = time(7, 0, 0);
    d.step(10);
    assert!(d.alarm().is_active());
    assert!(d.settings().is_idle());

    // Settings stay closed while it rings.
    press_select(&mut d, 20);
    assert!(d.settings().is_idle());
}

#[test]
fn alarm_discards_an_open_edit_without_writing() {
    for item_presses in 0..3 {
        let mut clock = rtc();
        clock.time = time(6, 59, 58);
        let mut d = dispatcher(clock);
        let mut now = 0;
        press_select(&mut d, now);
        for _ in 0..item_presses {
            now += 10;
            press_next(&mut d, now);
        }
        now += 10;
        press_select(&mut d, now);
        now += 10;
        press_next(&mut d, now);
        assert!(d.settings().is_editing());

        d.collaborators_mut().rtc.time = time(7, 0, 0);
        now += 10;
        d.step(now);
        assert!(d.alarm().is_active(), "edit {} kept the alarm from latching", item_presses);
        assert!(d.settings().is_idle());

        // The face comes back with the live time.
        d.collaborators_mut().rtc.time = time(7, 0, 2);
        now += 10;
        d.step(now);
        assert!(d.collaborators().display.shows("07:00:02"));

        let rtc = &d.collaborators().rtc;
        assert!(rtc.time_writes.is_empty());
        assert!(rtc.date_writes.is_empty());
        assert!(rtc.alarm_writes.is_empty());
    }
}

#[test]
fn disabling_the_alarm_stops_it() {
    let mut d = ringing();
    d.set_alarm_enabled(false);
    d.step(100);
    assert!(!d.alarm().is_active());
    assert!(!d.is_inverted());
    assert!(!d.collaborators().buzzer.sounding);
    assert_eq!(d.collaborators().rtc.alarm_enabled, Some(false));
}
