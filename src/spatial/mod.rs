//! Spatial data structures for scanning frames
//!
//! This module contains spatial-related functionality including:
//! - Base cell geometry and the chunk size hierarchy
//! - Pixel buffers for frames and objects
//! - Per-frame coverage tracking
//! - Chunk symmetries and canonicalization

/// Per-frame bitmap of claimed base cells
pub mod coverage;
/// Base cell geometry, chunk sizes and positions
pub mod grid;
/// RGBA pixel buffers
pub mod raster;
/// Orientation transforms and canonical chunk selection
pub mod tiles;

pub use coverage::CoverageArena;
pub use grid::{ChunkSize, Displacement, Position};
pub use raster::{Pixel, PixelBuffer};
pub use tiles::Orientation;
