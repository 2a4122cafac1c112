/// Run configuration.
pub mod config;
/// The top-level run state machine.
pub mod controller;
