//! Content analysis for candidate chunks

/// Row and column density classification
pub mod density;
