// Roll Clock — Digit Edit Buffer
//
// A time or date being edited is three two-digit groups shown as `LL:MM:RR`
// (or `LL-MM-RR`). Each digit the user can select is described by a
// `DigitSlot`; the separators at positions 2 and 5 have no slot and so can
// never be selected.
//
// Every field has a maximum value. The increment rules for both of its digits
// fall out of that maximum, and after each increment any field left above its
// maximum (29 Feb after the year changes, 19 -> 29 h) is pulled down to it:
//
//   tens modulus = max / 10 + 1
//   ones modulus = 10 while tens < max / 10, else max % 10 + 1
//
// e.g. hours (23): tens 0..=2, ones 0..=9 or 0..=3 once tens is 2.
// The day maximum is taken from the month and year *in the buffer*, so a year
// typed a moment ago already decides whether 29 February is reachable.

use core::fmt;

use crate::calendar::{days_in_month, Date, Time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
    Day,
    Month,
    Year,
}

impl Field {
    /// Which of the three on-screen groups holds this field.
    fn group(self) -> usize {
        match self {
            Self::Hours | Self::Day => 0,
            Self::Minutes | Self::Month => 1,
            Self::Seconds | Self::Year => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Tens,
    Ones,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitSlot {
    pub field: Field,
    pub place: Place,
}

impl DigitSlot {
    const fn new(field: Field, place: Place) -> Self {
        Self { field, place }
    }

    /// Character index in the 8-character rendering.
    pub fn position(&self) -> usize {
        let offset = match self.place {
            Place::Tens => 0,
            Place::Ones => 1,
        };
        self.field.group() * 3 + offset
    }
}

const CLOCK_SLOTS: [DigitSlot; 6] = [
    DigitSlot::new(Field::Hours, Place::Tens),
    DigitSlot::new(Field::Hours, Place::Ones),
    DigitSlot::new(Field::Minutes, Place::Tens),
    DigitSlot::new(Field::Minutes, Place::Ones),
    DigitSlot::new(Field::Seconds, Place::Tens),
    DigitSlot::new(Field::Seconds, Place::Ones),
];

// Year and month before day: the day bounds depend on both.
const CALENDAR_SLOTS: [DigitSlot; 6] = [
    DigitSlot::new(Field::Year, Place::Tens),
    DigitSlot::new(Field::Year, Place::Ones),
    DigitSlot::new(Field::Month, Place::Tens),
    DigitSlot::new(Field::Month, Place::Ones),
    DigitSlot::new(Field::Day, Place::Tens),
    DigitSlot::new(Field::Day, Place::Ones),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `HH:MM:SS`: time of day and alarm.
    Clock,
    /// `DD-MM-YY`.
    Calendar,
}

impl Layout {
    /// Editable digits in cursor order.
    pub fn slots(self) -> &'static [DigitSlot; 6] {
        match self {
            Self::Clock => &CLOCK_SLOTS,
            Self::Calendar => &CALENDAR_SLOTS,
        }
    }

    fn separator(self) -> char {
        match self {
            Self::Clock => ':',
            Self::Calendar => '-',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitPair {
    pub tens: u8,
    pub ones: u8,
}

impl DigitPair {
    pub fn from_value(value: u8) -> Self {
        Self {
            tens: value / 10,
            ones: value % 10,
        }
    }

    pub fn value(&self) -> u8 {
        self.tens * 10 + self.ones
    }

    fn clamp_to(&mut self, max: u8) {
        if self.value() > max {
            *self = Self::from_value(max);
        }
    }
}

fn tens_modulus(max: u8) -> u8 {
    max / 10 + 1
}

fn ones_modulus(max: u8, tens: u8) -> u8 {
    if tens < max / 10 {
        10
    } else {
        max % 10 + 1
    }
}

/// The uncommitted copy of the value being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditBuffer {
    layout: Layout,
    groups: [DigitPair; 3],
}

impl EditBuffer {
    pub fn from_time(time: &Time) -> Self {
        Self {
            layout: Layout::Clock,
            groups: [
                DigitPair::from_value(time.hours),
                DigitPair::from_value(time.minutes),
                DigitPair::from_value(time.seconds),
            ],
        }
    }

    pub fn from_date(date: &Date) -> Self {
        Self {
            layout: Layout::Calendar,
            groups: [
                DigitPair::from_value(date.day),
                DigitPair::from_value(date.month),
                DigitPair::from_value(date.year),
            ],
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn pair(&self, field: Field) -> DigitPair {
        self.groups[field.group()]
    }

    pub fn value(&self, field: Field) -> u8 {
        self.pair(field).value()
    }

    pub fn digit(&self, slot: DigitSlot) -> u8 {
        let pair = self.pair(slot.field);
        match slot.place {
            Place::Tens => pair.tens,
            Place::Ones => pair.ones,
        }
    }

    fn max_value(&self, field: Field) -> u8 {
        match field {
            Field::Hours => 23,
            Field::Minutes | Field::Seconds => 59,
            Field::Day => days_in_month(self.value(Field::Month), self.value(Field::Year)),
            Field::Month => 12,
            Field::Year => 99,
        }
    }

    /// Bump one digit with its field's rollover rule, then pull every group
    /// back inside the bounds the new value implies.
    pub fn increment(&mut self, slot: DigitSlot) {
        let max = self.max_value(slot.field);
        let pair = &mut self.groups[slot.field.group()];
        match slot.place {
            Place::Tens => pair.tens = (pair.tens + 1) % tens_modulus(max),
            Place::Ones => pair.ones = (pair.ones + 1) % ones_modulus(max, pair.tens),
        }
        self.revalidate();
    }

    fn revalidate(&mut self) {
        for slot in self.layout.slots().iter().step_by(2) {
            let max = self.max_value(slot.field);
            self.groups[slot.field.group()].clamp_to(max);
        }
    }

    pub fn to_time(&self) -> Option<Time> {
        Time::new(
            self.value(Field::Hours),
            self.value(Field::Minutes),
            self.value(Field::Seconds),
        )
    }

    /// `None` while the day or month is still `00`.
    pub fn to_date(&self) -> Option<Date> {
        Date::new(
            self.value(Field::Day),
            self.value(Field::Month),
            self.value(Field::Year),
        )
    }
}

impl fmt::Display for EditBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = self.layout.separator();
        let [l, m, r] = self.groups;
        write!(
            f,
            "{}{}{sep}{}{}{sep}{}{}",
            l.tens, l.ones, m.tens, m.ones, r.tens, r.ones
        )
    }
}
