// Roll Clock — Sensor Samples & Input Events

// ---------------------------------------------------------------------------
// Accelerometer sample (raw ADXL343 counts)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AxisSample {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

// ---------------------------------------------------------------------------
// Temperature / humidity reading
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentReading {
    pub celsius: f32,
    pub relative_humidity: f32,
}

// ---------------------------------------------------------------------------
// Button events (fed to the settings state machine)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Open the menu, pick a menu item, or confirm the selected digit.
    Select,
    /// Move the menu highlight, or bump the selected digit.
    Next,
}
