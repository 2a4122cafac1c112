//! The rendering engine's capability surface.
//!
//! Scene and option value types, the [`session::Engine`] trait the run controller drives, and a
//! headless implementation used by the CLI.

/// Non-interactive engine with a small rasterizer.
pub mod headless;
/// Per-render engine options.
pub mod options;
/// Scene value objects: camera, light, meshes, ground plane.
pub mod scene;
/// The engine trait and session types.
pub mod session;
/// Tone mapping and colour themes.
pub mod tone;
