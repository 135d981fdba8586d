//! Conversion between pixel-art animation frames and deduplicated tile objects
//!
//! Frames are decomposed into grid-aligned chunks, coarse to fine. Chunks that
//! are solid enough along both axes are canonicalized under the four
//! rectangular symmetries and stored once in an object library, with a
//! placement record per occurrence. The inverse pipeline composites objects
//! back into frames.

#![deny(unsafe_code)]

/// Forward and inverse pipelines, object library and placements
pub mod algorithm;
/// Content analysis of candidate chunks
pub mod analysis;
/// Configuration, errors and interchange formats
pub mod io;
/// Grid geometry, pixel buffers, coverage and symmetries
pub mod spatial;

pub use algorithm::frames::{
    FramesGeneratorConfig, GeneratedFrames, OverlapPolicy, generate_frames,
};
pub use algorithm::library::ObjectLibrary;
pub use algorithm::objects::{
    CancelFlag, GeneratedObjects, ObjectGeneratorConfig, generate_objects,
};
pub use algorithm::placement::{Frame, FrameDimensions, ObjectId, PlacementRecord};
pub use io::error::{ObjectStudioError, Result};
