/// Command-line interface and batch level generation
pub mod cli;
/// Tuning constants and defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// PNG preview export
pub mod image;
/// Batch progress display
pub mod progress;
/// Layered text format for levels
pub mod serializer;
/// Destinations for serialized levels
pub mod sink;
