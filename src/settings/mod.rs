// Roll Clock — Settings State Machine
//
// Two buttons drive everything:
//
//   Idle ──Select──▶ MenuRoot ──Select──▶ EditTime / EditDate / EditAlarm
//                      │  ▲                   │
//                      └──┘ Next              ├─ Next:   request digit increment
//                                             ├─ Select: next digit
//                                             └─ Select on last digit: commit ──▶ Idle
//
// A Next press only raises a flag; the flag is consumed once per frame by
// `apply_pending`, so presses that arrive faster than the screen redraws
// collapse into a single increment.

mod digits;

pub use digits::{DigitPair, DigitSlot, EditBuffer, Field, Layout, Place};

use crate::calendar::{AlarmTime, ClockSnapshot, Date, Time};
use crate::events::Button;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Time,
    Date,
    Alarm,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Time, MenuItem::Date, MenuItem::Alarm];

    pub fn next(self) -> Self {
        match self {
            Self::Time => Self::Date,
            Self::Date => Self::Alarm,
            Self::Alarm => Self::Time,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Time => "Set Time",
            Self::Date => "Set Date",
            Self::Alarm => "Set Alarm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    buffer: EditBuffer,
    cursor: usize,
    pending_increment: bool,
}

impl EditSession {
    pub fn new(buffer: EditBuffer) -> Self {
        Self {
            buffer,
            cursor: 0,
            pending_increment: false,
        }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> DigitSlot {
        self.buffer.layout().slots()[self.cursor]
    }

    pub fn is_last_slot(&self) -> bool {
        self.cursor + 1 == self.buffer.layout().slots().len()
    }

    fn apply_pending(&mut self) -> bool {
        if !self.pending_increment {
            return false;
        }
        self.pending_increment = false;
        self.buffer.increment(self.selected());
        true
    }

    fn advance(&mut self) {
        if !self.is_last_slot() {
            self.cursor += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SettingsState {
    #[default]
    Idle,
    MenuRoot {
        highlighted: MenuItem,
    },
    EditTime(EditSession),
    EditDate(EditSession),
    EditAlarm(EditSession),
}

impl SettingsState {
    pub fn session(&self) -> Option<&EditSession> {
        match self {
            Self::EditTime(s) | Self::EditDate(s) | Self::EditAlarm(s) => Some(s),
            Self::Idle | Self::MenuRoot { .. } => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut EditSession> {
        match self {
            Self::EditTime(s) | Self::EditDate(s) | Self::EditAlarm(s) => Some(s),
            Self::Idle | Self::MenuRoot { .. } => None,
        }
    }

    /// Which menu entry an edit state belongs to.
    pub fn target(&self) -> Option<MenuItem> {
        match self {
            Self::EditTime(_) => Some(MenuItem::Time),
            Self::EditDate(_) => Some(MenuItem::Date),
            Self::EditAlarm(_) => Some(MenuItem::Alarm),
            Self::Idle | Self::MenuRoot { .. } => None,
        }
    }
}

/// A confirmed edit, ready to be written to the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Time(Time),
    Date(Date),
    Alarm(AlarmTime),
}

#[derive(Debug, Clone, Default)]
pub struct SettingsMachine {
    state: SettingsState,
}

impl SettingsMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    /// An edit session is open (not just the menu).
    pub fn is_editing(&self) -> bool {
        self.state.session().is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.state == SettingsState::Idle
    }

    /// Feed one button press. Returns the value to write when the press
    /// confirmed the last digit of an edit.
    pub fn handle(&mut self, button: Button, snapshot: &ClockSnapshot) -> Option<Commit> {
        let state = core::mem::take(&mut self.state);
        let (next, commit) = transition(state, button, snapshot);
        self.state = next;
        commit
    }

    /// Apply the pending increment, if any. Call once per frame, before drawing.
    pub fn apply_pending(&mut self) -> bool {
        self.state
            .session_mut()
            .map_or(false, EditSession::apply_pending)
    }

    /// Drop the menu or edit session without writing anything.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            log::debug!("Settings cancelled from {:?}", self.state.target());
            self.state = SettingsState::Idle;
        }
    }
}

fn transition(
    state: SettingsState,
    button: Button,
    snapshot: &ClockSnapshot,
) -> (SettingsState, Option<Commit>) {
    use SettingsState::*;

    match (state, button) {
        (Idle, Button::Select) => (MenuRoot { highlighted: MenuItem::Time }, None),
        (Idle, Button::Next) => (Idle, None),

        (MenuRoot { highlighted }, Button::Next) => (
            MenuRoot {
                highlighted: highlighted.next(),
            },
            None,
        ),
        (MenuRoot { highlighted }, Button::Select) => (open(highlighted, snapshot), None),

        (EditTime(session), button) => edit(MenuItem::Time, session, button),
        (EditDate(session), button) => edit(MenuItem::Date, session, button),
        (EditAlarm(session), button) => edit(MenuItem::Alarm, session, button),
    }
}

fn open(item: MenuItem, snapshot: &ClockSnapshot) -> SettingsState {
    log::debug!("Editing {:?}", item);
    match item {
        MenuItem::Time => SettingsState::EditTime(EditSession::new(EditBuffer::from_time(&snapshot.time))),
        MenuItem::Date => SettingsState::EditDate(EditSession::new(EditBuffer::from_date(&snapshot.date))),
        MenuItem::Alarm => SettingsState::EditAlarm(EditSession::new(EditBuffer::from_time(&snapshot.alarm))),
    }
}

fn wrap(item: MenuItem, session: EditSession) -> SettingsState {
    match item {
        MenuItem::Time => SettingsState::EditTime(session),
        MenuItem::Date => SettingsState::EditDate(session),
        MenuItem::Alarm => SettingsState::EditAlarm(session),
    }
}

fn edit(item: MenuItem, mut session: EditSession, button: Button) -> (SettingsState, Option<Commit>) {
    match button {
        Button::Next => {
            session.pending_increment = true;
            (wrap(item, session), None)
        }
        Button::Select => {
            // An increment requested on this digit belongs to this digit.
            session.apply_pending();
            if session.is_last_slot() {
                (SettingsState::Idle, commit(item, &session.buffer))
            } else {
                session.advance();
                (wrap(item, session), None)
            }
        }
    }
}

fn commit(item: MenuItem, buffer: &EditBuffer) -> Option<Commit> {
    let commit = match item {
        MenuItem::Time => buffer.to_time().map(Commit::Time),
        MenuItem::Date => buffer.to_date().map(Commit::Date),
        MenuItem::Alarm => buffer.to_time().map(Commit::Alarm),
    };
    match commit {
        Some(c) => log::info!("Settings confirmed: {:?}", c),
        None => log::warn!("Discarding invalid {:?} entry {}", item, buffer),
    }
    commit
}
