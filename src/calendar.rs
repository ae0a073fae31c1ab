// Roll Clock — Calendar Types
//
// Plain decimal time/date values. Anything nibble-packed stays inside the RTC
// driver; by the time a value reaches this module it is an ordinary integer.

use core::fmt;

/// Two-digit year, 2000-based. Every fourth year is a leap year; the RTC
/// makes the same assumption and 2100 is out of range anyway.
pub fn is_leap_year(year: u8) -> bool {
    year % 4 == 0
}

/// Number of days in `month` for the given two-digit `year`.
///
/// Month 0 and anything past 12 report 31 so digit editing has a usable bound
/// while the month digits are still being entered.
pub fn days_in_month(month: u8, year: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Time {
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// The alarm is stored separately on the RTC but has the same shape.
pub type AlarmTime = Time;

// ---------------------------------------------------------------------------
// Calendar date
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl Date {
    pub fn new(day: u8, month: u8, year: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || year > 99 {
            return None;
        }
        if day == 0 || day > days_in_month(month, year) {
            return None;
        }
        Some(Self { day, month, year })
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }
}

impl Default for Date {
    fn default() -> Self {
        Self {
            day: 1,
            month: 1,
            year: 0,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:02}", self.day, self.month, self.year)
    }
}

// ---------------------------------------------------------------------------
// Weekday (1 = Monday … 7 = Sunday, as the RTC counts them)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekday(u8);

impl Weekday {
    pub fn new(day: u8) -> Option<Self> {
        (1..=7).contains(&day).then_some(Self(day))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn short_name(&self) -> &'static str {
        match self.0 {
            1 => "Mon",
            2 => "Tue",
            3 => "Wed",
            4 => "Thu",
            5 => "Fri",
            6 => "Sat",
            _ => "Sun",
        }
    }
}

impl Default for Weekday {
    fn default() -> Self {
        Self(1)
    }
}

/// Last values read back from the RTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub time: Time,
    pub date: Date,
    pub weekday: Weekday,
    pub alarm: AlarmTime,
}
