//! Lamp mode controller
//!
//! Owns every piece of mutable lamp state: mode, brightness, fixtures, servo
//! positions and the rainbow animation. Touch gestures and network commands
//! both end up here, so each transition has a single writer.

use embassy_time::Instant;
use rand::RngCore;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::color::{BLACK, PALETTE, RawColor, Rgb};
use crate::command::Command;
use crate::config::LampConfig;
use crate::effect::RainbowAnimator;
use crate::filter::Brightness;
use crate::fixture::{FIXTURE_COUNT, Fixture, FixtureId, ServoTarget};
use crate::servo::{EasingConfig, PulseRange, SERVO_COUNT, ServoId, ServoOutput, ServoState};
use crate::touch::Gesture;

/// Lamp operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Lights dark, servos parked
    Off,
    /// Solid palette color; custom colors keep the index they interrupted
    Static { color_index: usize },
    /// Palette cross-fade with wandering servos
    Rainbow,
}

/// Lamp state and transitions
pub struct Lamp<O: OutputDriver, const PIXELS: usize> {
    fixtures: [Fixture<O, PIXELS>; FIXTURE_COUNT],
    servos: [ServoState; SERVO_COUNT],
    rainbow: RainbowAnimator,
    brightness: Brightness,
    mode: Mode,
    color_index: usize,
    easing: EasingConfig,
    pulse: PulseRange,
}

impl<O: OutputDriver, const PIXELS: usize> Lamp<O, PIXELS> {
    /// Create a lamp and bring it to the off state
    ///
    /// Fixtures are indexed by [`FixtureId::index`].
    pub fn new(fixtures: [Fixture<O, PIXELS>; FIXTURE_COUNT], config: &LampConfig) -> Self {
        let mut lamp = Self {
            fixtures,
            servos: [ServoState::new(), ServoState::new()],
            rainbow: RainbowAnimator::new(&config.rainbow),
            brightness: config.brightness,
            mode: Mode::Off,
            color_index: 0,
            easing: config.easing,
            pulse: config.pulse,
        };
        lamp.turn_off();
        lamp
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Palette position used by tap cycling
    pub const fn color_index(&self) -> usize {
        self.color_index
    }

    pub const fn servo(&self, id: ServoId) -> &ServoState {
        &self.servos[id.index()]
    }

    pub const fn fixture(&self, id: FixtureId) -> &Fixture<O, PIXELS> {
        &self.fixtures[id.index()]
    }

    pub fn fixture_mut(&mut self, id: FixtureId) -> &mut Fixture<O, PIXELS> {
        &mut self.fixtures[id.index()]
    }

    pub const fn rainbow(&self) -> &RainbowAnimator {
        &self.rainbow
    }

    /// Apply a touch gesture
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Tap => self.tap(),
            Gesture::Hold => self.turn_off(),
        }
    }

    /// Step to the next mode in the tap cycle
    ///
    /// Off, then every palette color, then rainbow, then back to the first
    /// color.
    pub fn tap(&mut self) {
        match self.mode {
            Mode::Off | Mode::Rainbow => self.show_palette_color(0),
            Mode::Static { color_index } => {
                let next = color_index + 1;
                if next < PALETTE.len() {
                    self.show_palette_color(next);
                } else {
                    self.color_index = 0;
                    self.start_rainbow();
                }
            }
        }
    }

    /// Light up with the first palette color
    pub fn turn_on(&mut self) {
        self.show_palette_color(0);
    }

    /// Go dark and send both servos to rest
    pub fn turn_off(&mut self) {
        self.set_mode(Mode::Off);
        self.paint_all(BLACK);
        for servo in &mut self.servos {
            servo.park();
        }
    }

    /// Enter rainbow mode from the start of the animation
    pub fn start_rainbow(&mut self) {
        self.set_mode(Mode::Rainbow);
        self.rainbow.reset();
    }

    /// Change the brightness, repainting right away in static mode
    ///
    /// Rainbow picks the new value up on its next fade step.
    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
        if let Mode::Static { color_index } = self.mode {
            self.show_palette_color(color_index);
        }
    }

    /// Paint one fixture with a custom color and switch to static mode
    ///
    /// The palette index is left alone so the next tap continues the cycle
    /// from where it was. Channels outside `0..=255` saturate.
    pub fn set_fixture_color(&mut self, id: FixtureId, color: RawColor) {
        if !color.in_range() {
            #[cfg(feature = "esp32-log")]
            println!("[Lamp] saturating out of range color {:?}", color);
        }
        self.set_mode(Mode::Static {
            color_index: self.color_index,
        });
        self.paint(id, color.saturate());
    }

    /// Apply a parsed network command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::On => self.turn_on(),
            Command::Off => self.turn_off(),
            Command::Rainbow => self.start_rainbow(),
            Command::SetBrightness(brightness) => self.set_brightness(brightness),
            Command::SetColor { fixture, color } => self.set_fixture_color(fixture, color),
        }
    }

    /// Advance the rainbow animation if it is running
    pub fn step_animation<R: RngCore>(&mut self, now: Instant, rng: &mut R) {
        if self.mode != Mode::Rainbow {
            return;
        }

        let frame = self.rainbow.step(now, rng);
        if let Some(color) = frame.color {
            self.paint_all(color);
        }
        for (servo, target) in self.servos.iter_mut().zip(frame.targets) {
            if let Some(angle) = target {
                servo.set_target(angle);
            }
        }
    }

    /// Ease both servos one tick toward their targets
    pub fn advance_servos(&mut self) -> [ServoOutput; SERVO_COUNT] {
        let easing = self.easing;
        let pulse = self.pulse;
        [
            self.servos[0].advance(&easing, pulse),
            self.servos[1].advance(&easing, pulse),
        ]
    }

    fn show_palette_color(&mut self, index: usize) {
        self.color_index = index;
        self.set_mode(Mode::Static { color_index: index });
        self.paint_all(PALETTE[index]);
    }

    fn paint_all(&mut self, color: Rgb) {
        for id in FixtureId::ALL {
            self.paint(id, color);
        }
    }

    fn paint(&mut self, id: FixtureId, color: Rgb) {
        let target = self.fixtures[id.index()].paint(color, self.brightness);
        if let (Some(ServoTarget { servo, angle }), Mode::Static { .. }) = (target, self.mode) {
            self.servos[servo.index()].set_target(angle);
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        #[cfg(feature = "esp32-log")]
        if mode != self.mode {
            println!("[Lamp] mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }
}
