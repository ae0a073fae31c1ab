// Roll Clock — Push Buttons
//
// Two active-HIGH buttons with internal pull-downs. The raw levels are
// sampled once per loop pass and debounced in software.

use esp_idf_hal::gpio::{AnyIOPin, Input, PinDriver, Pull};

use rollclock::config::DEBOUNCE_MS;
use rollclock::input::Debouncer;
use rollclock::providers::InputProvider;
use rollclock::scheduler::Tick;

pub type ButtonPin = PinDriver<'static, AnyIOPin, Input>;

pub struct Buttons {
    select_pin: ButtonPin,
    next_pin: ButtonPin,
    select: Debouncer,
    next: Debouncer,
}

impl Buttons {
    pub fn new(mut select_pin: ButtonPin, mut next_pin: ButtonPin, now: Tick) -> anyhow::Result<Self> {
        select_pin.set_pull(Pull::Down)?;
        next_pin.set_pull(Pull::Down)?;
        Ok(Self {
            select_pin,
            next_pin,
            select: Debouncer::new(DEBOUNCE_MS, now),
            next: Debouncer::new(DEBOUNCE_MS, now),
        })
    }

    /// Call once per loop pass, before the dispatcher runs.
    pub fn sample(&mut self, now: Tick) {
        self.select.update(self.select_pin.is_high(), now);
        self.next.update(self.next_pin.is_high(), now);
    }
}

impl InputProvider for Buttons {
    fn select_pressed(&mut self) -> bool {
        self.select.take_pressed()
    }

    fn select_held(&mut self) -> bool {
        self.select.is_held()
    }

    fn next_pressed(&mut self) -> bool {
        self.next.take_pressed()
    }

    fn next_held(&mut self) -> bool {
        self.next.is_held()
    }
}
