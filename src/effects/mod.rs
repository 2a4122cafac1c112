/// Scalar-to-colour maps.
pub mod colormap;
/// Multi-pass frame compositing.
pub mod composite;
