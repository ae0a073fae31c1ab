// Roll Clock — Control Logic
//
// Hardware-independent core of the clock: orientation classification, task
// scheduling, the two-button settings menu, the alarm latch and the frame
// renderer. The firmware binary (`esp32` feature) wires it to real
// peripherals; everything here builds and tests on the host.

pub mod alarm;
pub mod calendar;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod events;
pub mod input;
pub mod orientation;
pub mod providers;
pub mod scheduler;
pub mod screens;
pub mod settings;

pub use dispatcher::{Collaborators, Dispatcher};
