//! Touch gesture detection
//!
//! Turns the sampled touch level into taps and holds. A hold fires as soon as
//! the press crosses the threshold, without waiting for the release.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Default press length that counts as a hold
pub const DEFAULT_HOLD_TIME: Duration = Duration::from_millis(2000);

/// Touch configuration
#[derive(Debug, Clone, Copy)]
pub struct TouchConfig {
    pub hold_time: Duration,
}

impl TouchConfig {
    pub const DEFAULT: Self = Self {
        hold_time: DEFAULT_HOLD_TIME,
    };
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Completed touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Short press, reported on release
    Tap,
    /// Long press, reported once at the threshold
    Hold,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    started: Instant,
    hold_reported: bool,
}

/// Edge and duration tracker for the touch input
#[derive(Debug, Clone)]
pub struct TouchDebouncer {
    hold_time: Duration,
    press: Option<Press>,
}

impl TouchDebouncer {
    pub const fn new(config: &TouchConfig) -> Self {
        Self {
            hold_time: config.hold_time,
            press: None,
        }
    }

    /// Returns true while a press is being tracked
    pub const fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Start of the tracked press
    pub fn press_started(&self) -> Option<Instant> {
        self.press.map(|press| press.started)
    }

    /// Feed one sample of the touch level
    pub fn poll(&mut self, pressed: bool, now: Instant) -> Option<Gesture> {
        let gesture = match (pressed, self.press) {
            (true, None) => {
                self.press = Some(Press {
                    started: now,
                    hold_reported: false,
                });
                None
            }
            (true, Some(press)) => {
                if !press.hold_reported && self.held_long_enough(press.started, now) {
                    self.press = Some(Press {
                        hold_reported: true,
                        ..press
                    });
                    Some(Gesture::Hold)
                } else {
                    None
                }
            }
            (false, Some(press)) => {
                self.press = None;
                if press.hold_reported {
                    None
                } else if self.held_long_enough(press.started, now) {
                    Some(Gesture::Hold)
                } else {
                    Some(Gesture::Tap)
                }
            }
            (false, None) => None,
        };

        #[cfg(feature = "esp32-log")]
        if let Some(gesture) = gesture {
            println!("[Touch] gesture {:?}", gesture);
        }

        gesture
    }

    fn held_long_enough(&self, started: Instant, now: Instant) -> bool {
        now.as_millis().saturating_sub(started.as_millis()) >= self.hold_time.as_millis()
    }
}

impl Default for TouchDebouncer {
    fn default() -> Self {
        Self::new(&TouchConfig::DEFAULT)
    }
}
