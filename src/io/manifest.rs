//! Serializable placement metadata
//!
//! A manifest carries everything the inverse pipeline needs besides the
//! object pixels: frame dimensions and placements. It can be stored whole or
//! split into one sidecar per frame.

use crate::algorithm::objects::GeneratedObjects;
use crate::algorithm::placement::{FrameDimensions, PlacementRecord};
use crate::io::error::Result;
use serde::{Deserialize, Serialize};

/// Declared size of one frame
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// Frame identifier
    pub id: String,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

/// Frame dimensions plus placements, ready for JSON
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Frames in reconstruction order
    pub frames: Vec<FrameEntry>,
    /// Placements across all listed frames
    pub placements: Vec<PlacementRecord>,
}

impl Manifest {
    /// Capture the metadata of a forward pipeline run
    pub fn from_generated(generated: &GeneratedObjects) -> Self {
        Self {
            frames: generated
                .frame_dimensions
                .iter()
                .map(|(id, (width, height))| FrameEntry {
                    id: id.clone(),
                    width: *width,
                    height: *height,
                })
                .collect(),
            placements: generated.placements.clone(),
        }
    }

    /// Frame dimensions in the shape `generate_frames` expects
    pub fn frame_dimensions(&self) -> Vec<(String, FrameDimensions)> {
        self.frames
            .iter()
            .map(|entry| (entry.id.clone(), (entry.width, entry.height)))
            .collect()
    }

    /// One single-frame manifest per frame, in frame order
    pub fn split_by_frame(&self) -> Vec<Self> {
        self.frames
            .iter()
            .map(|entry| Self {
                frames: vec![entry.clone()],
                placements: self
                    .placements
                    .iter()
                    .filter(|placement| placement.frame == entry.id)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Concatenate per-frame manifests back into one
    pub fn combine(sheets: impl IntoIterator<Item = Self>) -> Self {
        sheets
            .into_iter()
            .fold(Self::default(), |mut combined, sheet| {
                combined.frames.extend(sheet.frames);
                combined.placements.extend(sheet.placements);
                combined
            })
    }

    /// Serialize as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `Manifest` if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a manifest from JSON
    ///
    /// # Errors
    ///
    /// Returns `Manifest` if the text is not a valid manifest
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
