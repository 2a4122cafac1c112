//! Float-to-integer pixel quantization.
//!
//! Both paths round half away from zero (`f32::round`) before clamping: `126.5` becomes `127`,
//! not the `126` that ties-to-even would give.

use crate::render::frame::Frame;

/// Default multiplier applied before scaling raw radiance into the `u16` range.
pub const DEFAULT_RAW_GAIN: f32 = 0.1;

/// Round an already scaled value half away from zero, then clamp to `[0, max]`.
///
/// NaN ends up as 0 through the saturating float-to-int cast.
pub fn quantize_scaled(scaled: f32, max: f32) -> f32 {
    scaled.round().clamp(0.0, max)
}

/// `[0, 1]` to `0..=255`.
pub fn quantize_u8(v: f32) -> u8 {
    quantize_scaled(v * 255.0, 255.0) as u8
}

/// Raw radiance to `0..=65535`, scaled by `gain`.
pub fn quantize_u16(v: f32, gain: f32) -> u16 {
    let max = f32::from(u16::MAX);
    quantize_scaled(gain * max * v, max) as u16
}

/// All four channels as 8-bit RGBA.
pub fn to_rgba8(frame: &Frame) -> Vec<u8> {
    frame.data.iter().map(|&v| quantize_u8(v)).collect()
}

/// Colour channels only, alpha dropped, as 16-bit RGB scaled by `gain`.
pub fn to_rgb16(frame: &Frame, gain: f32) -> Vec<u16> {
    frame
        .pixels()
        .flat_map(|px| [px[0], px[1], px[2]])
        .map(|v| quantize_u16(v, gain))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/quantize.rs"]
mod tests;
