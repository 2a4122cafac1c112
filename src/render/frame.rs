use crate::foundation::{
    core::Canvas,
    error::{RtnprError, RtnprResult},
};

/// A rendered frame as straight-alpha RGBA `f32` pixels.
///
/// Channels are nominally in `[0, 1]`; raw (un-tone-mapped) renders may exceed 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA floats, tightly packed, row-major.
    pub data: Vec<f32>,
}

impl Frame {
    /// Wrap an RGBA buffer, checking that it holds exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> RtnprResult<Self> {
        let frame = Self {
            width,
            height,
            data,
        };
        frame.check()?;
        Ok(frame)
    }

    /// A frame with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [f32; 4]) -> Self {
        Self {
            width,
            height,
            data: rgba.repeat(width as usize * height as usize),
        }
    }

    /// Frame size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGBA pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(4)
    }

    /// Pixel at `(x, y)`; panics out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Per-pixel mean of the three colour channels.
    pub fn rgb_mean(&self) -> Vec<f32> {
        self.pixels().map(|p| (p[0] + p[1] + p[2]) / 3.0).collect()
    }

    /// Engine output sanity check: non-empty and sized `width * height * 4`.
    pub fn check(&self) -> RtnprResult<()> {
        if self.pixel_count() == 0 || self.data.is_empty() {
            return Err(RtnprError::invalid_frame("empty image buffer"));
        }
        if self.data.len() != self.pixel_count() * 4 {
            return Err(RtnprError::invalid_frame(format!(
                "buffer holds {} floats, expected {}x{}x4",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        if self.data.iter().any(|v| v.is_nan()) {
            return Err(RtnprError::invalid_frame("buffer contains NaN"));
        }
        Ok(())
    }

    /// Like [`Frame::check`], also requiring the given canvas size.
    pub fn check_canvas(&self, canvas: Canvas) -> RtnprResult<()> {
        self.check()?;
        if self.canvas() != canvas {
            return Err(RtnprError::invalid_frame(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                self.width, self.height, canvas.width, canvas.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
