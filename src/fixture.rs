//! Light fixtures
//!
//! A fixture is one addressable pixel group. Two of the three fixtures are
//! paired with a servo that mirrors the painted color as a needle position.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::filter::Brightness;
use crate::servo::ServoId;

/// Number of fixtures on the board
pub const FIXTURE_COUNT: usize = 3;

/// Fixture identifier, numbered from 1 like the command interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureId {
    One,
    Two,
    Three,
}

impl FixtureId {
    pub const ALL: [Self; FIXTURE_COUNT] = [Self::One, Self::Two, Self::Three];

    pub const fn from_number(number: u8) -> Option<Self> {
        Some(match number {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            _ => return None,
        })
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

/// Weighted channel mix that turns a color into a needle angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleFormula {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    /// Angle reached by a full-weight white
    pub span: f32,
}

impl AngleFormula {
    /// Servo A leans on red
    pub const SERVO_A: Self = Self {
        red: 0.5,
        green: 0.3,
        blue: 0.2,
        span: 160.0,
    };

    /// Servo B leans on green and blue
    pub const SERVO_B: Self = Self {
        red: 0.2,
        green: 0.5,
        blue: 0.3,
        span: 160.0,
    };

    /// Whole-degree angle for a color
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn angle(self, color: Rgb) -> f32 {
        let level = (self.red * f32::from(color.r)
            + self.green * f32::from(color.g)
            + self.blue * f32::from(color.b))
            / 255.0;
        (level * self.span) as i32 as f32
    }
}

/// Non-owning link from a fixture to the servo it drives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoLink {
    pub servo: ServoId,
    pub formula: AngleFormula,
}

impl ServoLink {
    pub const A: Self = Self {
        servo: ServoId::A,
        formula: AngleFormula::SERVO_A,
    };

    pub const B: Self = Self {
        servo: ServoId::B,
        formula: AngleFormula::SERVO_B,
    };
}

/// Angle a linked servo should move to after a paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoTarget {
    pub servo: ServoId,
    pub angle: f32,
}

/// One pixel group with its output driver
pub struct Fixture<O: OutputDriver, const PIXELS: usize> {
    output: O,
    pixels: [Rgb; PIXELS],
    link: Option<ServoLink>,
}

impl<O: OutputDriver, const PIXELS: usize> Fixture<O, PIXELS> {
    /// Light-only fixture
    pub const fn new(output: O) -> Self {
        Self {
            output,
            pixels: [Rgb { r: 0, g: 0, b: 0 }; PIXELS],
            link: None,
        }
    }

    /// Fixture paired with a servo
    pub const fn with_servo(output: O, link: ServoLink) -> Self {
        Self {
            output,
            pixels: [Rgb { r: 0, g: 0, b: 0 }; PIXELS],
            link: Some(link),
        }
    }

    /// Fill the pixel group with `color` scaled by `brightness` and flush it
    ///
    /// Returns the target for the linked servo, derived from the unscaled
    /// color. Whether the target is applied is up to the caller.
    pub fn paint(&mut self, color: Rgb, brightness: Brightness) -> Option<ServoTarget> {
        let scaled = brightness.apply(color);
        self.pixels.fill(scaled);
        self.output.write(&self.pixels);

        self.link.map(|link| ServoTarget {
            servo: link.servo,
            angle: link.formula.angle(color),
        })
    }

    /// Colors sent on the last flush
    pub const fn pixels(&self) -> &[Rgb; PIXELS] {
        &self.pixels
    }

    pub const fn link(&self) -> Option<ServoLink> {
        self.link
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

/// Adapter from a `smart-leds` strip driver to [`OutputDriver`]
pub struct SmartLedsOutput<W>(pub W);

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite,
    Rgb: Into<W::Color>,
{
    fn write(&mut self, colors: &[Rgb]) {
        if self.0.write(colors.iter().copied()).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[SmartLedsOutput] strip write failed");
        }
    }
}
