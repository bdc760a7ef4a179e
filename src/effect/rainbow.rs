//! Palette cross-fade
//!
//! Walks the palette pair by pair, painting one intermediate color per fade
//! interval. After the last step of a pair it moves on to the next pair,
//! wrapping back to the first color at the end.

use embassy_time::{Duration, Instant};

use crate::color::{PALETTE, Rgb, fade_between};

/// Default delay between two fade steps
pub const DEFAULT_FADE_INTERVAL: Duration = Duration::from_millis(50);

/// Default number of steps between two palette colors
pub const DEFAULT_FADE_STEPS: u16 = 100;

/// Palette cross-fade position
#[derive(Debug, Clone)]
pub struct RainbowFade {
    interval: Duration,
    steps: u16,
    palette_index: usize,
    progress: u16,
    last_update: Option<Instant>,
}

impl RainbowFade {
    pub const fn new(interval: Duration, steps: u16) -> Self {
        Self {
            interval,
            steps,
            palette_index: 0,
            progress: 0,
            last_update: None,
        }
    }

    /// Index of the color the fade starts from
    pub const fn palette_index(&self) -> usize {
        self.palette_index
    }

    /// Current step within the pair, in `0..=steps`
    pub const fn progress(&self) -> u16 {
        self.progress
    }

    /// Rewind to the first palette color
    ///
    /// The next [`RainbowFade::step`] paints immediately.
    pub fn reset(&mut self) {
        self.palette_index = 0;
        self.progress = 0;
        self.last_update = None;
    }

    /// Produce the next color if the fade interval has passed
    pub fn step(&mut self, now: Instant) -> Option<Rgb> {
        if let Some(last) = self.last_update {
            let elapsed = now.as_millis().saturating_sub(last.as_millis());
            if elapsed <= self.interval.as_millis() {
                return None;
            }
        }

        let from = PALETTE[self.palette_index % PALETTE.len()];
        let to = PALETTE[(self.palette_index + 1) % PALETTE.len()];
        let color = fade_between(from, to, self.progress, self.steps);

        if self.progress >= self.steps {
            self.progress = 0;
            self.palette_index = (self.palette_index + 1) % PALETTE.len();
        } else {
            self.progress += 1;
        }
        self.last_update = Some(now);

        Some(color)
    }
}

impl Default for RainbowFade {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_INTERVAL, DEFAULT_FADE_STEPS)
    }
}
