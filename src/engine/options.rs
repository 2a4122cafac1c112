use crate::foundation::{
    core::Canvas,
    error::{RtnprError, RtnprResult},
};

/// Largest accepted image width or height.
pub const MAX_DIMENSION: u32 = 16384;

/// How the engine maps radiance to output values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMode {
    /// Extended Reinhard compression.
    #[default]
    Reinhard = 0,
    /// Clip to `[0, 1]`.
    Linear = 1,
    /// Unmapped radiance; exported as 16-bit.
    Raw = 2,
}

/// Feature-line ("floor line") outline settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Draw outlines at all.
    pub enable: bool,
    /// Outlines only, no shading.
    pub line_only: bool,
    /// Draw every triangle edge.
    pub wireframe: bool,
    /// Line width in pixels.
    pub width: f32,
    /// Auxiliary rays per pixel used for edge detection.
    pub n_aux: u32,
    /// Line strength multiplier.
    pub intensity: f32,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            enable: false,
            line_only: false,
            wireframe: false,
            width: 1.5,
            n_aux: 4,
            intensity: 1.0,
        }
    }
}

/// Per-render engine configuration. Passed by reference into every render call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Progressive sample budget of the interactive preview.
    pub spp: u32,
    /// Samples taken by a single render call.
    pub spp_frame: u32,
    /// Maximum bounce depth.
    pub depth: u32,
    /// Show surface normals instead of shading.
    pub surface_normal: bool,
    /// Feature-line settings.
    pub outline: OutlineOptions,
    /// Output mapping.
    pub tone_mode: ToneMode,
    /// Colour theme index, see [`crate::engine::tone::THEMES`].
    pub theme_id: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            spp: 32,
            spp_frame: 1,
            depth: 4,
            surface_normal: false,
            outline: OutlineOptions::default(),
            tone_mode: ToneMode::Reinhard,
            theme_id: 0,
        }
    }
}

impl RenderOptions {
    /// Output size as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Reject empty or oversized canvases and zero sample or depth budgets.
    pub fn validate(&self) -> RtnprResult<()> {
        Canvas::new(self.width, self.height)?;
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(RtnprError::validation(format!(
                "image size {}x{} exceeds {MAX_DIMENSION} pixels per side",
                self.width, self.height
            )));
        }
        if self.spp == 0 || self.spp_frame == 0 {
            return Err(RtnprError::validation("sample counts must be positive"));
        }
        if self.depth == 0 {
            return Err(RtnprError::validation("bounce depth must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/options.rs"]
mod tests;
