use std::{path::PathBuf, sync::Arc};

use crate::{
    animation::trajectory::Trajectory,
    effects::composite::FrameCompositor,
    encode::{
        sink::{FrameSink, PngSequenceOpts, PngSequenceSink, SinkConfig},
        still::export_still,
    },
    engine::{
        options::{RenderOptions, ToneMode},
        scene::{Camera, Light, LightKind, MeshInstance, Scene},
        session::{AnimationSettings, Command, Engine},
    },
    foundation::error::{RtnprError, RtnprResult},
    mesh::{model::Mesh, obj::load_obj},
    session::config::RunConfig,
};

/// Where a run currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Nothing loaded yet, or loading failed.
    Idle,
    /// Mesh loaded, engine session running.
    InteractiveSetup,
    /// Session closed without a request.
    NoCommand,
    /// Rendering the still.
    ImageRequested,
    /// Rendering the animation.
    AnimationRequested,
    /// Run finished.
    Done,
}

/// Summary of an animation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationReport {
    /// Frames the session asked for.
    pub requested: u64,
    /// Frames pushed to the sink.
    pub written: u64,
    /// `false` when the engine stopped asking for the animation before the last frame.
    pub completed: bool,
}

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing was written.
    NoCommand,
    /// Path of the written still.
    Image(PathBuf),
    /// An animation run.
    Animation {
        /// Frame counts.
        report: AnimationReport,
        /// Sequence directory.
        dir: PathBuf,
        /// Encoded video, when enabled and the run completed.
        video: Option<PathBuf>,
    },
}

/// Top-level command loop: load, set up the scene, hand over to the engine session, then render
/// and export whatever the session asked for.
#[derive(Debug)]
pub struct RunController {
    config: RunConfig,
    state: RunState,
}

impl RunController {
    /// Create an idle controller.
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            state: RunState::Idle,
        }
    }

    /// Run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute one full run.
    ///
    /// Mesh and config errors surface before the engine is touched. An animation run deletes
    /// `<output_dir>/animation` before writing its first frame.
    #[tracing::instrument(skip_all, fields(mesh = %self.config.mesh_path.display()))]
    pub fn run<E: Engine + ?Sized>(&mut self, engine: &mut E) -> RtnprResult<RunOutcome> {
        self.config.validate()?;
        let mesh = load_obj(&self.config.mesh_path)?;

        self.state = RunState::InteractiveSetup;
        let (mut scene, mut options) = self.build_scene(mesh);
        let outcome = engine.interact(&mut scene, &mut options)?;
        options.validate()?;
        tracing::info!(command = ?outcome.command, "session finished");

        let result = match outcome.command {
            Command::None => {
                self.state = RunState::NoCommand;
                RunOutcome::NoCommand
            }
            Command::RenderImage => {
                self.state = RunState::ImageRequested;
                RunOutcome::Image(self.render_image(engine, &scene, &options)?)
            }
            Command::RenderAnimation => {
                self.state = RunState::AnimationRequested;
                let dir = self.config.animation_dir();
                let mut sink = PngSequenceSink::new(PngSequenceOpts {
                    dir: dir.clone(),
                    framerate: self.config.framerate,
                    encode_video: self.config.encode_video,
                });
                let report = self.render_animation(
                    engine,
                    &mut scene,
                    &options,
                    &outcome.animation,
                    &mut sink,
                )?;
                RunOutcome::Animation {
                    report,
                    dir,
                    video: sink.video().map(PathBuf::from),
                }
            }
        };

        self.state = RunState::Done;
        Ok(result)
    }

    /// Scene and preview options populated from the config.
    pub fn build_scene(&self, mesh: Mesh) -> (Scene, RenderOptions) {
        let camera = Camera {
            fov_deg: self.config.fov_deg,
            ..Camera::default()
        };

        let mut instance = MeshInstance::new(Arc::new(mesh));
        instance.scale = self.config.placement.scale;
        instance.shift_z = self.config.placement.shift_z;

        let mut scene = Scene {
            camera,
            light: Light::new(LightKind::SoftDirectional),
            meshes: Vec::new(),
            plane: self.config.plane.clone(),
            phong: self.config.phong.clone(),
        };
        scene.add_mesh(instance);

        (scene, self.config.options.clone())
    }

    fn final_options(&self, options: &RenderOptions) -> RenderOptions {
        RenderOptions {
            spp_frame: self.config.final_spp_frame,
            ..options.clone()
        }
    }

    /// Render one high-quality frame and write it as a still.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn render_image<E: Engine + ?Sized>(
        &self,
        engine: &mut E,
        scene: &Scene,
        options: &RenderOptions,
    ) -> RtnprResult<PathBuf> {
        let compositor = FrameCompositor::new(self.config.composite_mode());
        let final_opts = self.final_options(options);
        let frame = compositor.compose(engine, scene, &final_opts)?;

        // Difference composites are display-ready regardless of the preview's tone mode.
        let tone = if compositor.is_difference() {
            ToneMode::Reinhard
        } else {
            final_opts.tone_mode
        };
        let path = export_still(&frame, tone, &self.config.output_dir, self.config.raw_gain)?;
        tracing::info!(path = %path.display(), "wrote image");
        Ok(path)
    }

    /// Render every frame of the animation into `sink`.
    ///
    /// Frames are fully rendered and pushed one at a time. If the engine's command changes away
    /// from [`Command::RenderAnimation`] the loop stops, frames already pushed stay, and
    /// `sink.end()` is not called.
    #[tracing::instrument(level = "debug", skip_all, fields(frames = settings.frames))]
    pub fn render_animation<E: Engine + ?Sized>(
        &self,
        engine: &mut E,
        scene: &mut Scene,
        options: &RenderOptions,
        settings: &AnimationSettings,
        sink: &mut dyn FrameSink,
    ) -> RtnprResult<AnimationReport> {
        if settings.frames == 0 {
            return Err(RtnprError::validation("animation needs at least one frame"));
        }

        let trajectory = Trajectory::plan(engine, scene, settings, self.config.sweep)?;
        let compositor = FrameCompositor::new(self.config.composite_mode());
        let final_opts = self.final_options(options);

        sink.begin(SinkConfig {
            canvas: final_opts.canvas(),
            frames: trajectory.len() as u64,
        })?;

        let requested = trajectory.len() as u64;
        let mut written = 0u64;
        for idx in trajectory.indices() {
            if engine.command() != Command::RenderAnimation {
                tracing::warn!(frame = idx.0, "animation stopped by the engine");
                return Ok(AnimationReport {
                    requested,
                    written,
                    completed: false,
                });
            }

            trajectory.frame(idx).apply(scene);
            let frame = compositor.compose(engine, scene, &final_opts)?;
            sink.push_frame(idx, &frame)?;
            written += 1;
            tracing::info!("frame {} / {}", written, requested);
        }

        sink.end()?;
        Ok(AnimationReport {
            requested,
            written,
            completed: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
