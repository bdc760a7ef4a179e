//! Shared mocks for the lamp integration tests

#![allow(dead_code)] // Each test file uses a different subset

use mood_lamp_core::fixture::Fixture;
use mood_lamp_core::{
    Instant, Lamp, LampConfig, OutputDriver, Rgb, ServoDriver, ServoLink, TouchInput,
};
use rand::RngCore;

pub const PIXELS: usize = 4;

pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

pub fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

/// Pixel strip that remembers every flush
#[derive(Debug, Default)]
pub struct MockStrip {
    pub frames: Vec<Vec<Rgb>>,
}

impl MockStrip {
    pub fn last(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn writes(&self) -> usize {
        self.frames.len()
    }
}

impl OutputDriver for MockStrip {
    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }
}

/// Servo channel that records the last duty and every release
#[derive(Debug, Default)]
pub struct MockServo {
    pub duty: Option<u16>,
    pub releases: usize,
}

impl ServoDriver for MockServo {
    fn set_duty(&mut self, duty: u16) {
        self.duty = Some(duty);
    }

    fn release(&mut self) {
        self.duty = None;
        self.releases += 1;
    }
}

/// Touch pad controlled by the test
#[derive(Debug, Default)]
pub struct MockTouch {
    pub pressed: bool,
}

impl TouchInput for MockTouch {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

/// Rng that only yields zeros: every coin flip succeeds, every range
/// returns its lower end
pub struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

/// Rng that only yields ones: coin flips never succeed
pub struct MaxRng;

impl RngCore for MaxRng {
    fn next_u32(&mut self) -> u32 {
        u32::MAX
    }

    fn next_u64(&mut self) -> u64 {
        u64::MAX
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(u8::MAX);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(u8::MAX);
        Ok(())
    }
}

pub fn fixtures() -> [Fixture<MockStrip, PIXELS>; 3] {
    [
        Fixture::with_servo(MockStrip::default(), ServoLink::A),
        Fixture::with_servo(MockStrip::default(), ServoLink::B),
        Fixture::new(MockStrip::default()),
    ]
}

pub fn lamp() -> Lamp<MockStrip, PIXELS> {
    Lamp::new(fixtures(), &LampConfig::DEFAULT)
}
