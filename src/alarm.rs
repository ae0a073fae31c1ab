// Roll Clock — Alarm Engine
//
// Matches the current time against the alarm time and latches. Once latched
// the alarm stays active until something clears it, so it neither re-triggers
// nor stops on its own as the seconds move past the alarm time.

use crate::calendar::{AlarmTime, Time};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlarmStatus {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug, Clone)]
pub struct AlarmEngine {
    enabled: bool,
    status: AlarmStatus,
}

impl Default for AlarmEngine {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AlarmEngine {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            status: AlarmStatus::Inactive,
        }
    }

    pub fn check_match(&mut self, current: &Time, alarm: &AlarmTime) -> AlarmStatus {
        if self.enabled && self.status == AlarmStatus::Inactive && current == alarm {
            log::info!("Alarm latched at {}", current);
            self.status = AlarmStatus::Active;
        }
        self.status
    }

    pub fn deactivate(&mut self) {
        if self.status == AlarmStatus::Active {
            log::info!("Alarm deactivated");
        }
        self.status = AlarmStatus::Inactive;
    }

    /// Disabling also drops the latch.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.deactivate();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn status(&self) -> AlarmStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == AlarmStatus::Active
    }
}
