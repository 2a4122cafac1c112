//! rtnpr drives a ray-tracing engine through one interactive setup session and exports what the
//! session asks for.
//!
//! A run goes through these steps:
//!
//! - Load a triangle mesh from an OBJ file ([`load_obj`])
//! - Hand a [`Scene`] and [`RenderOptions`] to an [`Engine`] for interactive setup
//! - Render a still ([`export_still`]) or an animation into a [`FrameSink`], optionally as a
//!   difference visualization ([`FrameCompositor`])
//!
//! [`RunController`] ties the steps together.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Sun sweep and per-frame animation state.
pub mod animation;
/// Frame compositing: standard and difference visualization.
pub mod effects;
pub mod encode;
pub mod engine;
pub(crate) mod mesh;
/// Frame buffers returned by the engine.
pub mod render;
/// Run configuration and the run controller.
pub mod session;

pub use crate::foundation::core::{Canvas, FrameIndex, Vec3};
pub use crate::foundation::error::{RtnprError, RtnprResult};

pub use crate::animation::sun::{SweepPolicy, sun_directions};
pub use crate::animation::trajectory::{FrameState, Trajectory};
pub use crate::effects::composite::{CompositeMode, DiffOptions, FrameCompositor, PlaneMask};
pub use crate::encode::sink::{
    FrameSink, InMemorySink, PngSequenceOpts, PngSequenceSink, SinkConfig,
};
pub use crate::encode::still::export_still;
pub use crate::engine::headless::{HeadlessEngine, HeadlessOpts};
pub use crate::engine::options::{RenderOptions, ToneMode};
pub use crate::engine::scene::{Camera, Light, LightKind, MeshInstance, Scene};
pub use crate::engine::session::{AnimationSettings, Command, Engine, SessionOutcome};
pub use crate::mesh::model::Mesh;
pub use crate::mesh::obj::{load_obj, parse_obj};
pub use crate::render::frame::Frame;
pub use crate::session::config::RunConfig;
pub use crate::session::controller::{AnimationReport, RunController, RunOutcome, RunState};
