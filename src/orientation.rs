// Roll Clock — Orientation Classifier
//
// The clock is a rounded bar that the user rolls onto one of four faces. The
// face it rests on decides what is shown and which way up it is drawn.

use crate::events::AxisSample;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Upright. Clock face and settings.
    #[default]
    Normal,
    /// Rolled a quarter turn counter-clockwise. Temperature and humidity.
    RotatedCcw90,
    UpsideDown,
    RotatedCw90,
}

/// Raw-count thresholds. `active` is how far an axis must read for gravity to
/// count as pointing along it; `inactive` is the band around zero an axis
/// must stay within to count as level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub active: i32,
    pub inactive: i32,
}

impl Thresholds {
    fn is_level(&self, axis: i32) -> bool {
        axis.unsigned_abs() < self.inactive.unsigned_abs()
    }

    /// `|z| > 1.5 * inactive`, kept in integers.
    fn is_tipped(&self, z: i32) -> bool {
        2 * u64::from(z.unsigned_abs()) > 3 * u64::from(self.inactive.unsigned_abs())
    }
}

/// Classify one sample. Returns `previous` whenever the evidence does not
/// single out one face: device lying flat, or tilted across a diagonal.
pub fn classify(sample: AxisSample, previous: DisplayMode, t: &Thresholds) -> DisplayMode {
    let AxisSample { x, y, z } = sample;

    if t.is_tipped(z) {
        previous
    } else if y < -t.active && t.is_level(x) {
        DisplayMode::Normal
    } else if x < -t.active && t.is_level(y) {
        DisplayMode::RotatedCcw90
    } else if y > t.active && t.is_level(x) {
        DisplayMode::UpsideDown
    } else if x > t.active && t.is_level(y) {
        DisplayMode::RotatedCw90
    } else {
        previous
    }
}

/// `classify` plus the sticky current mode.
#[derive(Debug, Clone)]
pub struct OrientationClassifier {
    thresholds: Thresholds,
    mode: DisplayMode,
}

impl OrientationClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            mode: DisplayMode::Normal,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Feed a fresh sample. Returns the (possibly unchanged) mode.
    pub fn update(&mut self, sample: AxisSample) -> DisplayMode {
        let next = classify(sample, self.mode, &self.thresholds);
        if next != self.mode {
            log::debug!("Orientation {:?} -> {:?} ({:?})", self.mode, next, sample);
            self.mode = next;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Thresholds = Thresholds {
        active: 1400,
        inactive: 500,
    };

    const ALL_MODES: [DisplayMode; 4] = [
        DisplayMode::Normal,
        DisplayMode::RotatedCcw90,
        DisplayMode::UpsideDown,
        DisplayMode::RotatedCw90,
    ];

    #[test]
    fn dominant_axis_picks_the_face() {
        let prev = DisplayMode::UpsideDown;
        assert_eq!(classify(AxisSample::new(0, -2000, 0), prev, &T), DisplayMode::Normal);
        assert_eq!(classify(AxisSample::new(-2000, 100, 0), prev, &T), DisplayMode::RotatedCcw90);
        assert_eq!(classify(AxisSample::new(-100, 2000, 0), DisplayMode::Normal, &T), DisplayMode::UpsideDown);
        assert_eq!(classify(AxisSample::new(2000, 0, 300), prev, &T), DisplayMode::RotatedCw90);
    }

    #[test]
    fn lying_flat_holds_the_previous_mode() {
        for prev in ALL_MODES {
            for z in [751, -751, 4000, i32::MIN, i32::MAX] {
                for (x, y) in [(0, -2000), (-2000, 0), (0, 2000), (2000, 0), (0, 0)] {
                    assert_eq!(classify(AxisSample::new(x, y, z), prev, &T), prev);
                }
            }
        }
    }

    #[test]
    fn z_exactly_at_the_limit_is_still_upright() {
        let s = AxisSample::new(0, -2000, 750);
        assert_eq!(classify(s, DisplayMode::UpsideDown, &T), DisplayMode::Normal);
    }

    #[test]
    fn diagonal_tilt_holds_the_previous_mode() {
        for prev in ALL_MODES {
            assert_eq!(classify(AxisSample::new(1500, -1500, 0), prev, &T), prev);
            assert_eq!(classify(AxisSample::new(-600, -2000, 0), prev, &T), prev);
            assert_eq!(classify(AxisSample::new(1000, 0, 0), prev, &T), prev);
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let samples = [
            AxisSample::new(0, -2000, 0),
            AxisSample::new(1500, -1500, 0),
            AxisSample::new(0, 0, 4000),
            AxisSample::new(2000, 499, -700),
        ];
        for s in samples {
            for prev in ALL_MODES {
                let once = classify(s, prev, &T);
                assert_eq!(classify(s, once, &T), once);
                assert_eq!(classify(s, prev, &T), once);
            }
        }
    }

    #[test]
    fn classifier_is_sticky() {
        let mut c = OrientationClassifier::new(T);
        assert_eq!(c.update(AxisSample::new(-2000, 0, 0)), DisplayMode::RotatedCcw90);
        assert_eq!(c.update(AxisSample::new(0, 0, 4000)), DisplayMode::RotatedCcw90);
        assert_eq!(c.update(AxisSample::new(900, 900, 0)), DisplayMode::RotatedCcw90);
        assert_eq!(c.update(AxisSample::new(0, -2000, 0)), DisplayMode::Normal);
        assert_eq!(c.mode(), DisplayMode::Normal);
    }
}
