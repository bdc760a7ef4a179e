//! Lamp configuration
//!
//! Every tunable of the control loop lives here. [`LampConfig::DEFAULT`]
//! matches the reference board: 24-pixel rings, SG90-class servos on a 50 Hz
//! PWM channel and a capacitive touch pad.

use embassy_time::Duration;

use crate::effect::RainbowConfig;
use crate::filter::Brightness;
use crate::servo::{EasingConfig, PulseRange};
use crate::touch::TouchConfig;

/// Pixels per fixture on the reference board
pub const DEFAULT_PIXEL_COUNT: usize = 24;

/// Default pause at the end of every tick
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for the lamp and its control loop
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    /// Brightness at power-on
    pub brightness: Brightness,
    pub easing: EasingConfig,
    pub pulse: PulseRange,
    pub rainbow: RainbowConfig,
    pub touch: TouchConfig,
    /// Yield between two ticks
    pub tick_interval: Duration,
}

impl LampConfig {
    pub const DEFAULT: Self = Self {
        brightness: Brightness::DEFAULT,
        easing: EasingConfig::DEFAULT,
        pulse: PulseRange::DEFAULT,
        rainbow: RainbowConfig::DEFAULT,
        touch: TouchConfig::DEFAULT,
        tick_interval: DEFAULT_TICK_INTERVAL,
    };
}

impl Default for LampConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
