use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    encode::{
        ffmpeg::ensure_dir,
        quantize::{to_rgb16, to_rgba8},
    },
    engine::options::ToneMode,
    foundation::error::{RtnprError, RtnprResult},
    render::frame::Frame,
};

/// Still written for tone-mapped frames.
pub const SCREENSHOT_PNG: &str = "screenshot.png";
/// Still written for raw frames.
pub const SCREENSHOT_TIFF: &str = "screenshot.tiff";

/// Write a single frame into `out_dir` and return the written path.
///
/// `Raw` frames keep their radiance: RGB only, scaled by `raw_gain` into 16 bits, saved as
/// `screenshot.tiff`. Everything else is tone mapped already and saved as 8-bit RGBA
/// `screenshot.png`.
#[tracing::instrument(level = "debug", skip(frame))]
pub fn export_still(
    frame: &Frame,
    tone_mode: ToneMode,
    out_dir: &Path,
    raw_gain: f32,
) -> RtnprResult<PathBuf> {
    frame.check()?;
    ensure_dir(out_dir)?;

    if tone_mode == ToneMode::Raw {
        let max_pixel = frame.data.iter().copied().fold(f32::MIN, f32::max);
        tracing::info!(max_pixel, "raw export");

        let path = out_dir.join(SCREENSHOT_TIFF);
        write_rgb16_tiff(&path, frame.width, frame.height, to_rgb16(frame, raw_gain))?;
        Ok(path)
    } else {
        let path = out_dir.join(SCREENSHOT_PNG);
        write_rgba8_png(&path, frame)?;
        Ok(path)
    }
}

pub(crate) fn write_rgba8_png(path: &Path, frame: &Frame) -> RtnprResult<()> {
    image::save_buffer_with_format(
        path,
        &to_rgba8(frame),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn write_rgb16_tiff(path: &Path, width: u32, height: u32, data: Vec<u16>) -> RtnprResult<()> {
    let img = image::ImageBuffer::<image::Rgb<u16>, Vec<u16>>::from_raw(width, height, data)
        .ok_or_else(|| RtnprError::encode("rgb16 buffer does not match frame size"))?;
    img.save_with_format(path, image::ImageFormat::Tiff)
        .with_context(|| format!("write tiff '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
