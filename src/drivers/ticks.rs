// Roll Clock — Millisecond Tick

use rollclock::providers::TickSource;
use rollclock::scheduler::Tick;

/// Milliseconds since boot from the high-resolution timer. Wraps at ~49 days;
/// every consumer compares ticks with wrapping subtraction.
pub struct EspTicks;

impl TickSource for EspTicks {
    fn now(&self) -> Tick {
        // SAFETY: read-only query of the free-running system timer.
        unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as Tick }
    }
}
