mod brightness;

pub use brightness::{Brightness, MAX_LEVEL};
