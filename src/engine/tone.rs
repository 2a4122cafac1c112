use crate::engine::options::ToneMode;

const REINHARD_BURN: f32 = 4.0;

/// Colour ramp used by the tone mapper: mapped values interpolate `lo -> hi`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorTheme {
    /// Colour for mapped value 0.
    pub lo: [f32; 3],
    /// Colour for mapped value 1.
    pub hi: [f32; 3],
}

/// Built-in themes: grayscale, then blue to pink.
pub const THEMES: [ColorTheme; 2] = [
    ColorTheme {
        lo: [0.0, 0.0, 0.0],
        hi: [1.0, 1.0, 1.0],
    },
    ColorTheme {
        lo: [165.0 / 255.0, 206.0 / 255.0, 239.0 / 255.0],
        hi: [250.0 / 255.0, 210.0 / 255.0, 219.0 / 255.0],
    },
];

/// Theme lookup; unknown ids fall back to the grayscale theme.
pub fn theme(id: u32) -> ColorTheme {
    THEMES.get(id as usize).copied().unwrap_or(THEMES[0])
}

/// Reinhard with white-point burn: `c (1 + c / burn^2) / (1 + c)`.
pub fn reinhard(c: f32, burn: f32) -> f32 {
    c * (1.0 + c / (burn * burn)) / (1.0 + c)
}

/// Map linear radiance to output RGB. `Raw` passes radiance through untouched.
pub fn map_rgb(c: [f32; 3], mode: ToneMode, theme_id: u32) -> [f32; 3] {
    let mapped = match mode {
        ToneMode::Raw => return c,
        ToneMode::Linear => c,
        ToneMode::Reinhard => c.map(|v| reinhard(v, REINHARD_BURN)),
    };
    let t = theme(theme_id);
    std::array::from_fn(|i| {
        let v = mapped[i].clamp(0.0, 1.0);
        (1.0 - v) * t.lo[i] + v * t.hi[i]
    })
}

#[cfg(test)]
#[path = "../../tests/unit/engine/tone.rs"]
mod tests;
