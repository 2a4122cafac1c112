use crate::foundation::error::{RtnprError, RtnprResult};

/// Single-precision 3-vector used for positions and directions.
pub type Vec3 = nalgebra::Vector3<f32>;

/// Absolute 0-based frame index within an animation run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Zero-padded 3-digit stem used for sequence file names (`7` -> `"007"`).
    pub fn file_stem(self) -> String {
        format!("{:03}", self.0)
    }
}

/// Output image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> RtnprResult<Self> {
        if width == 0 || height == 0 {
            return Err(RtnprError::validation("canvas width/height must be non-zero"));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
