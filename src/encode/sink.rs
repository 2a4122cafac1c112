use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    encode::{
        ffmpeg::{DEFAULT_FRAMERATE, ensure_dir, finalize_video},
        still::write_rgba8_png,
    },
    foundation::{
        core::{Canvas, FrameIndex},
        error::{RtnprError, RtnprResult},
    },
    render::frame::Frame,
};

/// Configuration provided to a [`FrameSink`] at the start of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size every pushed frame must have.
    pub canvas: Canvas,
    /// Number of frames the run intends to push.
    pub frames: u64,
}

/// Sink contract for consuming animation frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing [`FrameIndex`] order. `end`
/// is only called after the last frame of a run that completed.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RtnprResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> RtnprResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RtnprResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Frame)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config passed to the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames pushed since the last `begin`.
    pub fn frames(&self) -> &[(FrameIndex, Frame)] {
        &self.frames
    }

    /// Whether `end` ran after the last `begin`.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RtnprResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> RtnprResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RtnprResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Options for [`PngSequenceSink`].
#[derive(Clone, Debug)]
pub struct PngSequenceOpts {
    /// Directory owned by the run. Deleted and recreated in `begin`.
    pub dir: PathBuf,
    /// Video frame rate.
    pub framerate: u32,
    /// Encode `video.mp4` from the sequence in `end`.
    pub encode_video: bool,
}

impl PngSequenceOpts {
    /// Options for `dir` with the default frame rate and video encoding on.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            framerate: DEFAULT_FRAMERATE,
            encode_video: true,
        }
    }
}

/// Writes each frame as `NNN.png` into a dedicated directory and optionally encodes a video.
///
/// `begin` deletes the directory with all of its contents: the latest run always wins.
#[derive(Debug)]
pub struct PngSequenceSink {
    opts: PngSequenceOpts,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
    video: Option<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink; nothing touches the disk until `begin`.
    pub fn new(opts: PngSequenceOpts) -> Self {
        Self {
            opts,
            cfg: None,
            last_idx: None,
            written: Vec::new(),
            video: None,
        }
    }

    /// Sequence directory.
    pub fn dir(&self) -> &Path {
        &self.opts.dir
    }

    /// Frame files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Encoded video, once `end` has run with encoding enabled.
    pub fn video(&self) -> Option<&Path> {
        self.video.as_deref()
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> RtnprResult<()> {
        let dir = &self.opts.dir;
        if dir.as_os_str().is_empty() || dir.parent().is_none() {
            return Err(RtnprError::validation(format!(
                "refusing to clear '{}' as an animation directory",
                dir.display()
            )));
        }
        if self.opts.encode_video && self.opts.framerate == 0 {
            return Err(RtnprError::validation("framerate must be non-zero"));
        }

        if dir.exists() {
            tracing::info!(dir = %dir.display(), "clearing previous animation output");
            std::fs::remove_dir_all(dir)
                .with_context(|| format!("failed to clear '{}'", dir.display()))?;
        }
        ensure_dir(dir)?;

        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        self.video = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> RtnprResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(RtnprError::validation("push_frame called before begin"));
        };
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(RtnprError::validation(format!(
                "frames must be pushed in increasing order (got {} after {})",
                idx.0, last.0
            )));
        }
        frame.check_canvas(cfg.canvas)?;

        let path = self.opts.dir.join(format!("{}.png", idx.file_stem()));
        write_rgba8_png(&path, frame)?;
        tracing::debug!(path = %path.display(), "wrote frame");

        self.last_idx = Some(idx);
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> RtnprResult<()> {
        if self.opts.encode_video {
            self.video = Some(finalize_video(&self.opts.dir, self.opts.framerate)?);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
