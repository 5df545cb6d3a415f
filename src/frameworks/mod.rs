// Frameworks layer: configuration, tracing, and process wiring.

pub mod app;
pub mod config;
