// Roll Clock — Button Conditioning
//
// Debounce and hold-to-repeat, expressed on the millisecond tick so they can
// be driven from the GPIO driver on target and from plain numbers in tests.
// Designed to be sampled every control-loop pass.

use crate::scheduler::{elapsed, Tick};

/// A raw level is trusted once it has not changed for `window` ticks.
pub fn is_settled(last_edge: Tick, now: Tick, window: Tick) -> bool {
    now.wrapping_sub(last_edge) >= window
}

pub struct Debouncer {
    window: Tick,

    // Raw signal tracking
    last_raw: bool,
    last_edge: Tick,

    // Debounced output
    stable: bool,
    pressed: bool,
}

impl Debouncer {
    pub fn new(window: Tick, now: Tick) -> Self {
        Self {
            window,
            last_raw: false,
            last_edge: now,
            stable: false,
            pressed: false,
        }
    }

    /// Feed the raw level (`true` = pressed).
    pub fn update(&mut self, raw: bool, now: Tick) {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_edge = now;
        }

        if !is_settled(self.last_edge, now, self.window) {
            // Signal still bouncing, wait.
            return;
        }

        if raw && !self.stable {
            self.pressed = true;
        }
        self.stable = raw;
    }

    /// Press edge since the last call.
    pub fn take_pressed(&mut self) -> bool {
        core::mem::take(&mut self.pressed)
    }

    pub fn is_held(&self) -> bool {
        self.stable
    }
}

/// Tracks how long a button has been held and reports when the hold has
/// lasted long enough to start auto-repeating. The repeat cadence itself
/// comes from the scheduler.
#[derive(Debug, Clone)]
pub struct HoldRepeat {
    delay: Tick,
    since: Option<Tick>,
}

impl HoldRepeat {
    pub fn new(delay: Tick) -> Self {
        Self { delay, since: None }
    }

    pub fn update(&mut self, held: bool, now: Tick) -> bool {
        if !held {
            self.since = None;
            return false;
        }
        let since = *self.since.get_or_insert(now);
        elapsed(since, self.delay, now)
    }
}
