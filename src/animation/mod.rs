/// Sun direction sweep.
pub mod sun;
/// Per-frame animation state.
pub mod trajectory;
