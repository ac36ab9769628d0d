//! Input/output operations, configuration and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Algorithm constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG export
pub mod image;
/// Progress display
pub mod progress;
