/// Floating-point RGBA frame buffers.
pub mod frame;
