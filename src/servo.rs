//! Servo easing
//!
//! Every servo has a commanded target angle and a current angle that is walked
//! toward the target a little on every tick. The step shrinks as the servo gets
//! closer, with a floor so it never stalls and a snap once it is close enough.

use libm::{copysignf, fabsf};

/// Lowest angle a servo may be commanded to
pub const ANGLE_MIN: f32 = 0.0;

/// Highest angle a servo may be commanded to (hardware safe range)
pub const ANGLE_MAX: f32 = 170.0;

/// Angle span that maps onto the full pulse range
pub const ANGLE_SPAN: f32 = 180.0;

/// Number of servos on the board
pub const SERVO_COUNT: usize = 2;

/// Servo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoId {
    A,
    B,
}

impl ServoId {
    pub const ALL: [Self; SERVO_COUNT] = [Self::A, Self::B];

    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Easing constants
#[derive(Debug, Clone, Copy)]
pub struct EasingConfig {
    /// Fraction of the remaining distance covered per tick
    pub gain: f32,
    /// Smallest step per tick, in degrees
    pub step_min: f32,
    /// Largest step per tick, in degrees
    pub step_max: f32,
    /// Remaining distance below which the servo snaps onto the target
    pub snap_distance: f32,
}

impl EasingConfig {
    pub const DEFAULT: Self = Self {
        gain: 0.05,
        step_min: 0.2,
        step_max: 1.5,
        snap_distance: 0.5,
    };
}

impl Default for EasingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Duty range of the servo PWM channel
///
/// `min` corresponds to 0 degrees and `max` to [`ANGLE_SPAN`] degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRange {
    pub min: u16,
    pub max: u16,
}

impl PulseRange {
    /// 16-bit duty at 50 Hz, 0.5 ms to 2.5 ms
    pub const DEFAULT: Self = Self {
        min: 1638,
        max: 8191,
    };

    /// Map an angle onto the duty range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duty(self, angle: f32) -> u16 {
        let span = f32::from(self.max.saturating_sub(self.min));
        let duty = f32::from(self.min) + (angle / ANGLE_SPAN) * span;
        duty.clamp(0.0, f32::from(u16::MAX)) as u16
    }
}

impl Default for PulseRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What the servo driver should do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoOutput {
    /// Drive the servo with this duty
    Duty(u16),
    /// Cut the signal so the servo relaxes
    Release,
    /// Signal is already off, nothing to send
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriveState {
    Active,
    Parking,
    Released,
}

/// Eased servo position
#[derive(Debug, Clone)]
pub struct ServoState {
    current: f32,
    target: f32,
    drive: DriveState,
}

impl ServoState {
    /// Servo at rest with its signal off
    pub const fn new() -> Self {
        Self {
            current: ANGLE_MIN,
            target: ANGLE_MIN,
            drive: DriveState::Released,
        }
    }

    pub const fn current(&self) -> f32 {
        self.current
    }

    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Returns true once the signal has been cut and no new target was set
    pub const fn is_released(&self) -> bool {
        matches!(self.drive, DriveState::Released)
    }

    /// Returns true while the servo is moving to rest before release
    pub const fn is_parking(&self) -> bool {
        matches!(self.drive, DriveState::Parking)
    }

    /// Set a new target angle, clamped to the safe range
    ///
    /// Re-enables the drive signal if it was released.
    pub fn set_target(&mut self, angle: f32) {
        self.target = clamp_angle(angle);
        self.drive = DriveState::Active;
    }

    /// Send the servo to rest and cut the signal once it gets there
    pub fn park(&mut self) {
        self.target = ANGLE_MIN;
        self.drive = DriveState::Parking;
    }

    /// Advance one tick toward the target
    #[allow(clippy::float_cmp)]
    pub fn advance(&mut self, easing: &EasingConfig, pulse: PulseRange) -> ServoOutput {
        if self.drive == DriveState::Released {
            return ServoOutput::Idle;
        }

        let diff = self.target - self.current;
        if diff != 0.0 {
            let step = (fabsf(diff) * easing.gain).clamp(easing.step_min, easing.step_max);
            self.current += copysignf(step, diff);
            if fabsf(self.target - self.current) < easing.snap_distance {
                self.current = self.target;
            }
        }

        if self.drive == DriveState::Parking && self.current == self.target {
            self.drive = DriveState::Released;
            return ServoOutput::Release;
        }

        ServoOutput::Duty(pulse.duty(self.current))
    }
}

impl Default for ServoState {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_angle(angle: f32) -> f32 {
    if angle.is_nan() {
        return ANGLE_MIN;
    }
    angle.clamp(ANGLE_MIN, ANGLE_MAX)
}
