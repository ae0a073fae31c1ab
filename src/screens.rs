// Roll Clock — Screens
//
// One function per screen. Each draws into a cleared frame; the dispatcher
// presents it.
//
// Clock face (128x64):
//   ┌──────────────────────────┐
//   │        HH:MM:SS          │
//   ├───────────────────┬──────┤
//   │ Ddd DD-MM-YY      │  AL  │
//   └───────────────────┴──────┘

use crate::calendar::ClockSnapshot;
use crate::events::EnvironmentReading;
use crate::orientation::DisplayMode;
use crate::providers::{DisplayProvider, Font};
use crate::settings::{EditSession, MenuItem};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------
const FACE_TIME_X: i32 = 16;
const FACE_TIME_Y: i32 = 6;
const FACE_DIVIDER_Y: i32 = 33;
const FACE_DATE_X: i32 = 5;
const FACE_DATE_Y: i32 = 44;
const FACE_ALARM_DIVIDER_X: i32 = 102;
const FACE_ALARM_X: i32 = 108;

const MENU_ROW_HEIGHT: i32 = 20;
const MENU_TEXT_X: i32 = 8;
const MENU_TEXT_INSET: i32 = 5;

const EDIT_TITLE_X: i32 = 8;
const EDIT_TITLE_Y: i32 = 6;
const EDIT_VALUE_X: i32 = 16;
const EDIT_VALUE_Y: i32 = 30;
const EDIT_SCALE: u32 = 2;

const ENV_X: i32 = 2;

pub fn clock_face<D: DisplayProvider>(display: &mut D, snapshot: &ClockSnapshot, alarm_enabled: bool) {
    let mode = DisplayMode::Normal;
    display.draw_rect(0, 0, 127, 63);

    let time = snapshot.time.to_string();
    display.draw_text(&time, FACE_TIME_X, FACE_TIME_Y, Font::Medium, 2, mode);

    display.draw_line(0, FACE_DIVIDER_Y, 127, FACE_DIVIDER_Y);
    display.draw_line(FACE_ALARM_DIVIDER_X, FACE_DIVIDER_Y, FACE_ALARM_DIVIDER_X, 63);

    let date = format!("{} {}", snapshot.weekday.short_name(), snapshot.date);
    display.draw_text(&date, FACE_DATE_X, FACE_DATE_Y, Font::Medium, 1, mode);

    let indicator = if alarm_enabled { "AL" } else { "--" };
    display.draw_text(indicator, FACE_ALARM_X, FACE_DATE_Y, Font::Medium, 1, mode);
}

pub fn menu<D: DisplayProvider>(display: &mut D, highlighted: MenuItem) {
    for (row, item) in MenuItem::ALL.iter().enumerate() {
        let top = row as i32 * MENU_ROW_HEIGHT;
        display.draw_text(item.label(), MENU_TEXT_X, top + MENU_TEXT_INSET, Font::Medium, 1, DisplayMode::Normal);
        if *item == highlighted {
            display.invert_region(0, 128, top, top + MENU_ROW_HEIGHT);
        }
    }
}

/// The digit under the cursor is drawn inverted.
pub fn editor<D: DisplayProvider>(display: &mut D, target: MenuItem, session: &EditSession) {
    let mode = DisplayMode::Normal;
    display.draw_text(target.label(), EDIT_TITLE_X, EDIT_TITLE_Y, Font::Medium, 1, mode);

    let value = session.buffer().to_string();
    display.draw_text(&value, EDIT_VALUE_X, EDIT_VALUE_Y, Font::Medium, EDIT_SCALE, mode);

    let cell_w = Font::Medium.char_width() * EDIT_SCALE as i32;
    let cell_h = Font::Medium.char_height() * EDIT_SCALE as i32;
    let x0 = EDIT_VALUE_X + session.selected().position() as i32 * cell_w;
    display.invert_region(x0, x0 + cell_w, EDIT_VALUE_Y, EDIT_VALUE_Y + cell_h);
}

/// Drawn on its side: 64 wide, 128 tall.
pub fn environment<D: DisplayProvider>(display: &mut D, reading: Option<&EnvironmentReading>) {
    let mode = DisplayMode::RotatedCcw90;
    let (temperature, humidity) = match reading {
        Some(r) => (format!("{:.1}", r.celsius), format!("{:.1}", r.relative_humidity)),
        None => ("--.-".to_string(), "--.-".to_string()),
    };

    display.draw_text("Temp C", ENV_X, 10, Font::Small, 1, mode);
    display.draw_text(&temperature, ENV_X, 24, Font::Medium, 2, mode);
    display.draw_text("Humidity %", ENV_X, 70, Font::Small, 1, mode);
    display.draw_text(&humidity, ENV_X, 84, Font::Medium, 2, mode);
}

/// Placeholder face for orientations without content of their own.
pub fn label<D: DisplayProvider>(display: &mut D, mode: DisplayMode) {
    match mode {
        DisplayMode::UpsideDown => display.draw_text("Mode C", 34, 22, Font::Large, 1, mode),
        DisplayMode::RotatedCw90 => display.draw_text("Mode D", 2, 54, Font::Large, 1, mode),
        DisplayMode::Normal | DisplayMode::RotatedCcw90 => {}
    }
}
