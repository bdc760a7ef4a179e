use crate::color::Rgb;

/// Linear integer cross-fade between two colors
///
/// Returns `from` at `step == 0` and `to` at `step == steps`. Channel deltas are
/// floored, so fading down and fading up are symmetric in step size.
pub fn fade_between(from: Rgb, to: Rgb, step: u16, steps: u16) -> Rgb {
    if steps == 0 {
        return to;
    }
    Rgb {
        r: fade_channel(from.r, to.r, step, steps),
        g: fade_channel(from.g, to.g, step, steps),
        b: fade_channel(from.b, to.b, step, steps),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fade_channel(from: u8, to: u8, step: u16, steps: u16) -> u8 {
    let step = i32::from(step.min(steps));
    let delta = (i32::from(to) - i32::from(from)) * step;
    let value = i32::from(from) + delta.div_euclid(i32::from(steps));
    value.clamp(0, 255) as u8
}
