// Roll Clock — Cooperative Scheduler
//
// Nothing here sleeps. Each periodic job owns a "last run" slot; the control
// loop asks whether a slot is due and, if so, runs the job and stamps the slot.

/// One millisecond of the free-running counter. Wraps at 2^32 (~49 days).
pub type Tick = u32;

/// `true` once more than `interval` ticks have passed since `last_run`.
///
/// Unsigned wrapping subtraction keeps this correct when `now` has wrapped
/// past zero and `last_run` has not.
pub fn elapsed(last_run: Tick, interval: Tick, now: Tick) -> bool {
    now.wrapping_sub(last_run) > interval
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Orientation,
    RtcRefresh,
    AlarmBlink,
    Environment,
    ButtonRepeat,
}

impl Task {
    const COUNT: usize = 5;

    fn slot(self) -> usize {
        match self {
            Self::Orientation => 0,
            Self::RtcRefresh => 1,
            Self::AlarmBlink => 2,
            Self::Environment => 3,
            Self::ButtonRepeat => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleIntervals {
    pub orientation: Tick,
    pub rtc_refresh: Tick,
    pub alarm_blink: Tick,
    pub environment: Tick,
    pub button_repeat: Tick,
}

impl ScheduleIntervals {
    fn get(&self, task: Task) -> Tick {
        match task {
            Task::Orientation => self.orientation,
            Task::RtcRefresh => self.rtc_refresh,
            Task::AlarmBlink => self.alarm_blink,
            Task::Environment => self.environment,
            Task::ButtonRepeat => self.button_repeat,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    intervals: ScheduleIntervals,
    last_run: [Tick; Task::COUNT],
}

impl Scheduler {
    /// Every slot starts out due so the first loop pass reads all sensors.
    pub fn new(intervals: ScheduleIntervals, now: Tick) -> Self {
        let mut scheduler = Self {
            intervals,
            last_run: [now; Task::COUNT],
        };
        for task in [
            Task::Orientation,
            Task::RtcRefresh,
            Task::AlarmBlink,
            Task::Environment,
            Task::ButtonRepeat,
        ] {
            scheduler.rearm(task, now);
        }
        scheduler
    }

    pub fn is_due(&self, task: Task, now: Tick) -> bool {
        elapsed(self.last_run[task.slot()], self.intervals.get(task), now)
    }

    pub fn mark_run(&mut self, task: Task, now: Tick) {
        self.last_run[task.slot()] = now;
    }

    /// `is_due` + `mark_run` in one call.
    pub fn poll(&mut self, task: Task, now: Tick) -> bool {
        if self.is_due(task, now) {
            self.mark_run(task, now);
            true
        } else {
            false
        }
    }

    /// Make `task` due on its next poll.
    pub fn rearm(&mut self, task: Task, now: Tick) {
        let interval = self.intervals.get(task);
        self.last_run[task.slot()] = now.wrapping_sub(interval).wrapping_sub(1);
    }
}
