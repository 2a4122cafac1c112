use crate::{
    animation::sun::{SweepPolicy, sun_directions},
    engine::{
        scene::Scene,
        session::{AnimationSettings, Engine},
    },
    foundation::{
        core::{FrameIndex, Vec3},
        error::{RtnprError, RtnprResult},
    },
};

/// Light and camera state for one animation frame. `None` leaves the scene value as it is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    /// Towards-light direction for this frame.
    pub light_dir: Option<Vec3>,
    /// Camera position for this frame.
    pub camera_pos: Option<Vec3>,
}

impl FrameState {
    /// Push this frame's state into the scene; a moved camera re-aims at the origin.
    pub fn apply(&self, scene: &mut Scene) {
        if let Some(d) = self.light_dir {
            scene.light.set_dir(d);
        }
        if let Some(p) = self.camera_pos {
            scene.camera.set_position(p);
            scene.camera.look_at(Vec3::zeros());
        }
    }
}

/// Per-frame light directions and camera positions for one animation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    n_frames: usize,
    light_dirs: Option<Vec<Vec3>>,
    camera_positions: Option<Vec<Vec3>>,
}

impl Trajectory {
    /// Build the sequences requested by `settings`.
    ///
    /// Light directions come from the sun sweep; camera positions are computed by the engine from
    /// the current scene into a buffer allocated here.
    pub fn plan<E: Engine + ?Sized>(
        engine: &mut E,
        scene: &Scene,
        settings: &AnimationSettings,
        policy: SweepPolicy,
    ) -> RtnprResult<Self> {
        let n_frames = settings.frames as usize;

        let light_dirs = settings
            .light_animated
            .then(|| sun_directions(n_frames, policy));

        let camera_positions = if settings.camera_animated {
            let mut buf = vec![Vec3::zeros(); n_frames];
            engine.camera_positions(scene, &mut buf)?;
            if buf.iter().any(|p| !p.iter().all(|v| v.is_finite())) {
                return Err(RtnprError::engine("camera path contains non-finite positions"));
            }
            Some(buf)
        } else {
            None
        };

        Ok(Self {
            n_frames,
            light_dirs,
            camera_positions,
        })
    }

    /// Number of frames in the run.
    pub fn len(&self) -> usize {
        self.n_frames
    }

    /// `true` for a zero-frame run.
    pub fn is_empty(&self) -> bool {
        self.n_frames == 0
    }

    /// Sun sweep, if the light is animated.
    pub fn light_dirs(&self) -> Option<&[Vec3]> {
        self.light_dirs.as_deref()
    }

    /// Camera path, if the camera is animated.
    pub fn camera_positions(&self) -> Option<&[Vec3]> {
        self.camera_positions.as_deref()
    }

    /// State for frame `idx`; out-of-range indices yield an empty state.
    pub fn frame(&self, idx: FrameIndex) -> FrameState {
        let i = idx.0 as usize;
        FrameState {
            light_dir: self.light_dirs.as_ref().and_then(|v| v.get(i).copied()),
            camera_pos: self
                .camera_positions
                .as_ref()
                .and_then(|v| v.get(i).copied()),
        }
    }

    /// Frame indices `0..len` in order.
    pub fn indices(&self) -> impl Iterator<Item = FrameIndex> {
        (0..self.n_frames as u64).map(FrameIndex)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/trajectory.rs"]
mod tests;
