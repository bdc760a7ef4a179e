//! Cooperative control loop
//!
//! One tick runs, in order: touch poll and gesture dispatch, rainbow step,
//! servo easing, and at most one command request. Nothing in a tick blocks.
//! The caller sleeps for the returned duration between ticks.

use embassy_time::{Duration, Instant};
use rand::RngCore;

use crate::config::LampConfig;
use crate::fixture::{FIXTURE_COUNT, Fixture};
use crate::lamp::Lamp;
use crate::server::{CommandListener, service_one};
use crate::servo::{SERVO_COUNT, ServoId, ServoOutput};
use crate::touch::{Gesture, TouchDebouncer};
use crate::{OutputDriver, ServoDriver, TouchInput};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Gesture recognized this tick
    pub gesture: Option<Gesture>,
    /// Commands applied from a serviced request
    pub commands: usize,
    /// Whether a request was serviced
    pub serviced: bool,
    /// What each servo driver was told
    pub servos: [ServoOutput; SERVO_COUNT],
    /// How long to wait before the next tick
    pub sleep_duration: Duration,
}

/// Control loop driving a [`Lamp`] from its inputs
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = LampScheduler::new(lamp_parts, &LampConfig::DEFAULT);
///
/// loop {
///     let report = scheduler.tick(Instant::now());
///     Timer::after(report.sleep_duration).await;
/// }
/// ```
pub struct LampScheduler<O, S, T, L, R, const PIXELS: usize>
where
    O: OutputDriver,
    S: ServoDriver,
    T: TouchInput,
    L: CommandListener,
    R: RngCore,
{
    lamp: Lamp<O, PIXELS>,
    servo_drivers: [S; SERVO_COUNT],
    touch: T,
    debouncer: TouchDebouncer,
    listener: L,
    rng: R,
    tick_interval: Duration,
}

/// Hardware handed to a [`LampScheduler`]
pub struct LampParts<O, S, T, L, R, const PIXELS: usize>
where
    O: OutputDriver,
{
    /// Fixtures indexed by [`crate::FixtureId::index`]
    pub fixtures: [Fixture<O, PIXELS>; FIXTURE_COUNT],
    /// Servo drivers indexed by [`ServoId::index`]
    pub servo_drivers: [S; SERVO_COUNT],
    pub touch: T,
    pub listener: L,
    pub rng: R,
}

impl<O, S, T, L, R, const PIXELS: usize> LampScheduler<O, S, T, L, R, PIXELS>
where
    O: OutputDriver,
    S: ServoDriver,
    T: TouchInput,
    L: CommandListener,
    R: RngCore,
{
    pub fn new(parts: LampParts<O, S, T, L, R, PIXELS>, config: &LampConfig) -> Self {
        Self {
            lamp: Lamp::new(parts.fixtures, config),
            servo_drivers: parts.servo_drivers,
            touch: parts.touch,
            debouncer: TouchDebouncer::new(&config.touch),
            listener: parts.listener,
            rng: parts.rng,
            tick_interval: config.tick_interval,
        }
    }

    /// Run one control loop iteration
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let gesture = self.debouncer.poll(self.touch.is_pressed(), now);
        if let Some(gesture) = gesture {
            self.lamp.handle_gesture(gesture);
        }

        self.lamp.step_animation(now, &mut self.rng);

        let servos = self.lamp.advance_servos();
        for (driver, output) in self.servo_drivers.iter_mut().zip(servos) {
            match output {
                ServoOutput::Duty(duty) => driver.set_duty(duty),
                ServoOutput::Release => driver.release(),
                ServoOutput::Idle => {}
            }
        }

        let mut commands = 0;
        let serviced = if let Some(request) = service_one(&mut self.listener) {
            for command in &request {
                self.lamp.apply(*command);
            }
            commands = request.len();
            true
        } else {
            false
        };

        TickReport {
            gesture,
            commands,
            serviced,
            servos,
            sleep_duration: self.tick_interval,
        }
    }

    pub const fn lamp(&self) -> &Lamp<O, PIXELS> {
        &self.lamp
    }

    pub fn lamp_mut(&mut self) -> &mut Lamp<O, PIXELS> {
        &mut self.lamp
    }

    pub const fn servo_driver(&self, id: ServoId) -> &S {
        &self.servo_drivers[id.index()]
    }

    pub fn touch_mut(&mut self) -> &mut T {
        &mut self.touch
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}
