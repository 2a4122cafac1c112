//! Output: still images, numbered frame sequences and video.

/// `ffmpeg`-based video assembly.
pub mod ffmpeg;
/// Float-to-integer pixel quantization.
pub mod quantize;
/// Frame sink trait and built-in sinks.
pub mod sink;
/// Single-image export.
pub mod still;
