use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::foundation::error::{RtnprError, RtnprResult};

/// File name of the encoded video inside the sequence directory.
pub const VIDEO_FILE: &str = "video.mp4";
/// Frame rate used when none is configured.
pub const DEFAULT_FRAMERATE: u32 = 30;

/// Returns `true` if `ffmpeg` is available on `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> RtnprResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

/// Encode `dir/000.png, dir/001.png, ...` into `dir/video.mp4` at `framerate` fps.
///
/// Requires the system `ffmpeg`. An existing `video.mp4` is overwritten.
#[tracing::instrument(level = "info")]
pub fn finalize_video(dir: &Path, framerate: u32) -> RtnprResult<PathBuf> {
    if framerate == 0 {
        return Err(RtnprError::validation("framerate must be non-zero"));
    }
    if !is_ffmpeg_on_path() {
        return Err(RtnprError::encode(
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }

    let out_path = dir.join(VIDEO_FILE);
    let output = Command::new("ffmpeg")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .args(["-y", "-loglevel", "error", "-framerate"])
        .arg(framerate.to_string())
        .arg("-i")
        .arg(dir.join("%03d.png"))
        .args(["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"])
        // yuv420p needs even dimensions.
        .args(["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2"])
        .args(["-movflags", "+faststart"])
        .arg(&out_path)
        .output()
        .map_err(|e| {
            RtnprError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RtnprError::encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    tracing::info!(path = %out_path.display(), "wrote video");
    Ok(out_path)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
