#![cfg_attr(not(feature = "std"), no_std)]

pub mod color;
pub mod command;
pub mod config;
pub mod effect;
pub mod filter;
pub mod fixture;
pub mod lamp;
pub mod mailbox;
pub mod scheduler;
pub mod server;
pub mod servo;
pub mod touch;

pub use color::{PALETTE, RawColor, Rgb};
pub use command::{Command, Commands, ParseError, parse_request};
pub use config::LampConfig;
pub use effect::{RainbowAnimator, RainbowConfig};
pub use filter::Brightness;
pub use fixture::{Fixture, FixtureId, ServoLink, SmartLedsOutput};
pub use lamp::{Lamp, Mode};
pub use mailbox::{RequestSlot, SlotBusy};
pub use scheduler::{LampParts, LampScheduler, TickReport};
pub use server::{ACK_RESPONSE, CommandConnection, CommandListener, service_one};
pub use servo::{ServoId, ServoOutput, ServoState};
pub use touch::{Gesture, TouchDebouncer};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait for the pixel strip of one fixture.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Servo PWM channel
pub trait ServoDriver {
    /// Drive the servo with a raw duty value
    fn set_duty(&mut self, duty: u16);

    /// Cut the signal so the servo relaxes
    fn release(&mut self);
}

/// Touch pad sampled once per tick
pub trait TouchInput {
    /// Returns true while the pad is touched
    fn is_pressed(&mut self) -> bool;
}
