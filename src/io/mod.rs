//! Configuration, errors and interchange formats

/// Scan constants and configuration defaults
pub mod configuration;
/// Error types for object and frame generation
pub mod error;
/// Conversion between `image` buffers and pixel buffers
pub mod image;
/// Serializable placement metadata
pub mod manifest;
