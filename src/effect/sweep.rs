//! Wandering servo sweep
//!
//! Each servo follows a sine of its own phase between two bounds. Once in a
//! while, decided by a per-tick coin flip, the sweep reverses, picks new bounds
//! and holds still for a short pause. The chance is per tick, so the average
//! time between flips scales with the tick rate.

use embassy_time::{Duration, Instant};
use libm::sinf;
use rand::{Rng, RngCore};

/// Parameters shared by both sweeps
#[derive(Debug, Clone, Copy)]
pub struct SweepRandomness {
    /// Chance per tick of a reversal
    pub flip_probability: f64,
    /// Range for a freshly picked lower bound, in degrees
    pub min_bound: (u8, u8),
    /// Range for a freshly picked upper bound, in degrees
    pub max_bound: (u8, u8),
    /// Range for the pause after a reversal, in milliseconds
    pub pause_ms: (u64, u64),
    /// Upper limit of the random phase increment added to the base speed
    pub jitter: f32,
}

impl SweepRandomness {
    pub const DEFAULT: Self = Self {
        flip_probability: 0.005,
        min_bound: (20, 60),
        max_bound: (100, 160),
        pause_ms: (300, 800),
        jitter: 0.001,
    };
}

impl Default for SweepRandomness {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-servo sweep profile
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// Phase increment per tick, in radians
    pub base_speed: f32,
    /// Initial `(min, max)` bounds, in degrees
    pub bounds: (f32, f32),
    /// Initial direction, `1.0` or `-1.0`
    pub direction: f32,
}

impl SweepConfig {
    pub const SERVO_A: Self = Self {
        base_speed: 0.02,
        bounds: (60.0, 150.0),
        direction: 1.0,
    };

    pub const SERVO_B: Self = Self {
        base_speed: 0.03,
        bounds: (60.0, 160.0),
        direction: -1.0,
    };
}

/// Oscillating target generator for one servo
#[derive(Debug, Clone)]
pub struct ServoSweep {
    base_speed: f32,
    min: f32,
    max: f32,
    direction: f32,
    phase: f32,
    pause_until: Option<Instant>,
}

impl ServoSweep {
    pub const fn new(config: &SweepConfig) -> Self {
        Self {
            base_speed: config.base_speed,
            min: config.bounds.0,
            max: config.bounds.1,
            direction: config.direction,
            phase: 0.0,
            pause_until: None,
        }
    }

    pub const fn phase(&self) -> f32 {
        self.phase
    }

    pub const fn direction(&self) -> f32 {
        self.direction
    }

    /// Current `(min, max)` bounds
    pub const fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub const fn pause_until(&self) -> Option<Instant> {
        self.pause_until
    }

    /// Rewind the phase to zero
    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }

    /// Roll for a reversal
    ///
    /// Returns true if the sweep reversed and entered a pause.
    pub fn maybe_flip<R: RngCore>(
        &mut self,
        now: Instant,
        randomness: &SweepRandomness,
        rng: &mut R,
    ) -> bool {
        if !rng.gen_bool(randomness.flip_probability) {
            return false;
        }

        self.direction = -self.direction;
        self.min = f32::from(rng.gen_range(randomness.min_bound.0..=randomness.min_bound.1));
        self.max = f32::from(rng.gen_range(randomness.max_bound.0..=randomness.max_bound.1));
        let pause = rng.gen_range(randomness.pause_ms.0..=randomness.pause_ms.1);
        self.pause_until = Some(now + Duration::from_millis(pause));
        true
    }

    /// Advance the phase and return the new target angle
    ///
    /// Returns `None` while paused; the servo keeps its previous target.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn advance<R: RngCore>(
        &mut self,
        now: Instant,
        randomness: &SweepRandomness,
        rng: &mut R,
    ) -> Option<f32> {
        if let Some(until) = self.pause_until {
            if now <= until {
                return None;
            }
        }

        let jitter = rng.r#gen::<f32>() * randomness.jitter;
        self.phase += self.direction * (self.base_speed + jitter);
        let swing = (sinf(self.phase) + 1.0) / 2.0;
        Some((self.min + swing * (self.max - self.min)) as i32 as f32)
    }
}
