use crate::{
    engine::{options::RenderOptions, scene::Scene},
    foundation::{core::Vec3, error::RtnprResult},
    render::frame::Frame,
};

/// What the user asked for when the interactive session closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Session closed without a request.
    #[default]
    None = 0,
    /// Render and save one still.
    RenderImage = 1,
    /// Render and save an animation.
    RenderAnimation = 2,
}

/// Animation parameters chosen in the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Number of frames to render.
    pub frames: u32,
    /// Sweep the sun across the sky.
    pub light_animated: bool,
    /// Move the camera along the engine's path.
    pub camera_animated: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frames: 30,
            light_animated: false,
            camera_animated: true,
        }
    }
}

/// Result of [`Engine::interact`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionOutcome {
    /// What to render next.
    pub command: Command,
    /// Settings for [`Command::RenderAnimation`].
    pub animation: AnimationSettings,
}

/// The rendering engine as seen by the run controller.
///
/// Implementations own the renderer and the interactive viewer. Calls are synchronous; a render
/// observes exactly the scene and options it is given.
pub trait Engine {
    /// Run the interactive session until the user issues a command.
    ///
    /// The session may edit `scene` and `options` (camera pose, tone mode, ...); the controller
    /// continues from the edited values.
    fn interact(
        &mut self,
        scene: &mut Scene,
        options: &mut RenderOptions,
    ) -> RtnprResult<SessionOutcome>;

    /// Render one frame of `scene` with `options.spp_frame` samples.
    fn render(&mut self, scene: &Scene, options: &RenderOptions) -> RtnprResult<Frame>;

    /// Fill `out` with one camera position per animation frame.
    fn camera_positions(&mut self, scene: &Scene, out: &mut [Vec3]) -> RtnprResult<()>;

    /// The engine's current command; polled between animation frames.
    fn command(&self) -> Command;
}

/// Render and validate the result against the requested canvas.
pub fn render_checked<E: Engine + ?Sized>(
    engine: &mut E,
    scene: &Scene,
    options: &RenderOptions,
) -> RtnprResult<Frame> {
    let frame = engine.render(scene, options)?;
    frame.check_canvas(options.canvas())?;
    Ok(frame)
}
