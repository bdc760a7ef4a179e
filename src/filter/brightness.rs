//! Global brightness scaling
//!
//! Brightness is a plain multiplier in `0.0..=1.0` applied to every channel
//! right before output. It survives mode changes and is only touched by the
//! brightness command.

use crate::color::Rgb;

/// Largest raw level accepted by the brightness command
pub const MAX_LEVEL: i32 = 255;

/// Brightness multiplier, always within `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Brightness(f32);

impl Brightness {
    pub const FULL: Self = Self(1.0);
    pub const OFF: Self = Self(0.0);
    /// Power-on level
    pub const DEFAULT: Self = Self(0.7);

    /// Create a brightness, clamping to `0.0..=1.0`
    ///
    /// `NaN` collapses to zero.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::OFF;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Remap a raw `0..=255` level, clamping anything outside
    #[allow(clippy::cast_precision_loss)]
    pub fn from_level(level: i32) -> Self {
        Self::new(level as f32 / MAX_LEVEL as f32)
    }

    pub const fn value(self) -> f32 {
        self.0
    }

    /// Scale every channel, truncating toward zero
    pub fn apply(self, color: Rgb) -> Rgb {
        Rgb {
            r: self.scale(color.r),
            g: self.scale(color.g),
            b: self.scale(color.b),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scale(self, channel: u8) -> u8 {
        (f32::from(channel) * self.0) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::DEFAULT
    }
}
