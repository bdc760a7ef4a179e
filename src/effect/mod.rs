//! Rainbow animation
//!
//! The rainbow mode has two independent parts: a palette cross-fade paced by
//! wall time, and a pair of servo sweeps that advance on every tick.

mod rainbow;
mod sweep;

use embassy_time::{Duration, Instant};
use rand::RngCore;

pub use rainbow::{DEFAULT_FADE_INTERVAL, DEFAULT_FADE_STEPS, RainbowFade};
pub use sweep::{ServoSweep, SweepConfig, SweepRandomness};

use crate::color::Rgb;
use crate::servo::{SERVO_COUNT, ServoId};

/// Configuration for the rainbow animation
#[derive(Debug, Clone, Copy)]
pub struct RainbowConfig {
    /// Delay between two fade steps
    pub fade_interval: Duration,
    /// Steps between two palette colors
    pub fade_steps: u16,
    /// Sweep profiles, indexed by [`ServoId::index`]
    pub sweeps: [SweepConfig; SERVO_COUNT],
    pub randomness: SweepRandomness,
}

impl RainbowConfig {
    pub const DEFAULT: Self = Self {
        fade_interval: DEFAULT_FADE_INTERVAL,
        fade_steps: DEFAULT_FADE_STEPS,
        sweeps: [SweepConfig::SERVO_A, SweepConfig::SERVO_B],
        randomness: SweepRandomness::DEFAULT,
    };
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Output of one animation step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RainbowFrame {
    /// Color to paint on every fixture, if a fade step was due
    pub color: Option<Rgb>,
    /// New servo targets, `None` for a servo that is paused
    pub targets: [Option<f32>; SERVO_COUNT],
}

/// Rainbow animator state
#[derive(Debug, Clone)]
pub struct RainbowAnimator {
    fade: RainbowFade,
    sweeps: [ServoSweep; SERVO_COUNT],
    randomness: SweepRandomness,
}

impl RainbowAnimator {
    pub const fn new(config: &RainbowConfig) -> Self {
        Self {
            fade: RainbowFade::new(config.fade_interval, config.fade_steps),
            sweeps: [
                ServoSweep::new(&config.sweeps[0]),
                ServoSweep::new(&config.sweeps[1]),
            ],
            randomness: config.randomness,
        }
    }

    pub const fn fade(&self) -> &RainbowFade {
        &self.fade
    }

    pub const fn sweep(&self, servo: ServoId) -> &ServoSweep {
        &self.sweeps[servo.index()]
    }

    /// Restart the animation from the first palette color with zero phases
    ///
    /// Sweep directions and bounds are kept.
    pub fn reset(&mut self) {
        self.fade.reset();
        for sweep in &mut self.sweeps {
            sweep.reset_phase();
        }
    }

    /// Advance the animation by one tick
    pub fn step<R: RngCore>(&mut self, now: Instant, rng: &mut R) -> RainbowFrame {
        let color = self.fade.step(now);

        for sweep in &mut self.sweeps {
            sweep.maybe_flip(now, &self.randomness, rng);
        }

        let mut targets = [None; SERVO_COUNT];
        for (target, sweep) in targets.iter_mut().zip(self.sweeps.iter_mut()) {
            *target = sweep.advance(now, &self.randomness, rng);
        }

        RainbowFrame { color, targets }
    }
}

impl Default for RainbowAnimator {
    fn default() -> Self {
        Self::new(&RainbowConfig::DEFAULT)
    }
}
