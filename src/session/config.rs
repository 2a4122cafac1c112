use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    animation::sun::SweepPolicy,
    effects::composite::{CompositeMode, DiffOptions},
    encode::{ffmpeg::DEFAULT_FRAMERATE, quantize::DEFAULT_RAW_GAIN},
    engine::{
        options::RenderOptions,
        scene::{PhongParams, PlaneParams},
    },
    foundation::error::{RtnprError, RtnprResult},
};

/// Sub-directory of the output directory that holds animation frames.
pub const ANIMATION_SUBDIR: &str = "animation";

/// Scale and vertical offset applied to the loaded mesh.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeshPlacement {
    /// Uniform scale.
    pub scale: f32,
    /// Vertical offset after scaling.
    pub shift_z: f32,
}

impl Default for MeshPlacement {
    fn default() -> Self {
        Self {
            scale: 1.0,
            shift_z: 0.0,
        }
    }
}

/// Everything a run needs besides the engine. Loadable from JSON; unspecified fields default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// OBJ file to load.
    pub mesh_path: PathBuf,
    /// Root for `screenshot.*` and the animation directory.
    pub output_dir: PathBuf,
    /// Mesh scale and offset.
    pub placement: MeshPlacement,
    /// Camera vertical field of view in degrees.
    pub fov_deg: f32,
    /// Interactive-preview options; also the base for final renders.
    pub options: RenderOptions,
    /// Ground plane.
    pub plane: PlaneParams,
    /// Mesh material.
    pub phong: PhongParams,
    /// Samples per render call for final stills and animation frames.
    pub final_spp_frame: u32,
    /// Render the difference visualization instead of plain frames.
    pub difference: bool,
    /// Difference-mode settings.
    pub diff: DiffOptions,
    /// Video frame rate.
    pub framerate: u32,
    /// Assemble `video.mp4` after the frame sequence.
    pub encode_video: bool,
    /// Sun sweep range.
    pub sweep: SweepPolicy,
    /// Multiplier applied before mapping raw radiance into 16 bits.
    pub raw_gain: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mesh_path: PathBuf::new(),
            output_dir: PathBuf::from("./output"),
            placement: MeshPlacement::default(),
            fov_deg: 60.0,
            options: RenderOptions::default(),
            plane: PlaneParams::default(),
            phong: PhongParams::default(),
            final_spp_frame: 32,
            difference: false,
            diff: DiffOptions::default(),
            framerate: DEFAULT_FRAMERATE,
            encode_video: true,
            sweep: SweepPolicy::default(),
            raw_gain: DEFAULT_RAW_GAIN,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> RtnprResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Check sample counts, frame rate, fov, scale and gain.
    pub fn validate(&self) -> RtnprResult<()> {
        self.options.validate()?;
        if self.final_spp_frame == 0 {
            return Err(RtnprError::validation("final samples per frame must be positive"));
        }
        if self.framerate == 0 {
            return Err(RtnprError::validation("framerate must be non-zero"));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(RtnprError::validation("fov must be within (0, 180) degrees"));
        }
        if !(self.placement.scale.is_finite() && self.placement.scale > 0.0) {
            return Err(RtnprError::validation("mesh scale must be positive"));
        }
        if !(self.raw_gain.is_finite() && self.raw_gain > 0.0) {
            return Err(RtnprError::validation("raw gain must be positive"));
        }
        if self.difference && self.diff.background_spp_cap == 0 {
            return Err(RtnprError::validation("background sample cap must be positive"));
        }
        Ok(())
    }

    /// Compositing mode implied by `difference` and `diff`.
    pub fn composite_mode(&self) -> CompositeMode {
        if self.difference {
            CompositeMode::Difference(self.diff)
        } else {
            CompositeMode::Standard
        }
    }

    /// `<output_dir>/animation`.
    pub fn animation_dir(&self) -> PathBuf {
        self.output_dir.join(ANIMATION_SUBDIR)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
