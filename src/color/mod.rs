mod fade;

pub use fade::fade_between;
use smart_leds::RGB8;

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Reference colors used by static cycling and rainbow cross-fading
pub const PALETTE: [Rgb; 7] = [
    Rgb { r: 255, g: 0, b: 0 },
    Rgb { r: 0, g: 255, b: 0 },
    Rgb { r: 0, g: 0, b: 255 },
    Rgb { r: 255, g: 255, b: 0 },
    Rgb { r: 0, g: 255, b: 255 },
    Rgb { r: 255, g: 0, b: 255 },
    Rgb { r: 255, g: 255, b: 255 },
];

/// Color as received from the command interface, channels not yet range checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl RawColor {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Returns true if every channel already fits into `0..=255`
    pub const fn in_range(self) -> bool {
        fits_u8(self.r) && fits_u8(self.g) && fits_u8(self.b)
    }

    /// Convert to an 8-bit color, saturating out of range channels
    pub fn saturate(self) -> Rgb {
        Rgb {
            r: saturate_channel(self.r),
            g: saturate_channel(self.g),
            b: saturate_channel(self.b),
        }
    }
}

const fn fits_u8(value: i32) -> bool {
    value >= 0 && value <= 255
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturate_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
