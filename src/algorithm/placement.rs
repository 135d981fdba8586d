//! Placement records and frame identities shared by both pipelines

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Displacement, Position, Rect};
use crate::spatial::raster::PixelBuffer;
use crate::spatial::tiles::Orientation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Stable identifier of an object within one library
///
/// Identifiers are dense indices assigned in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub usize);

impl ObjectId {
    /// Position of the object in its library
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ties one frame position to an object, its orientation and offset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Frame the object is drawn into
    pub frame: String,
    /// Object drawn at this placement
    pub object: ObjectId,
    /// Aligned grid position of the chunk
    pub position: Position,
    /// Transform that maps the stored object onto the frame content
    pub orientation: Orientation,
    /// Offset between the grid position and the drawn content
    #[serde(default)]
    pub offset: Displacement,
}

impl PlacementRecord {
    /// Top-left corner the object is drawn at
    pub const fn destination(&self) -> (i64, i64) {
        self.offset.apply(self.position)
    }

    /// Destination rectangle for an object of the given size
    pub const fn footprint(&self, width: usize, height: usize) -> Rect {
        let (x, y) = self.destination();
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Frame dimensions as (width, height) in pixels
pub type FrameDimensions = (usize, usize);

/// One named raster pose of an animation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Caller-chosen frame identifier, unique within a batch
    pub id: String,
    /// Frame pixels
    pub buffer: PixelBuffer,
}

impl Frame {
    /// Create a frame
    pub fn new(id: impl Into<String>, buffer: PixelBuffer) -> Self {
        Self {
            id: id.into(),
            buffer,
        }
    }

    /// Frame size as (width, height)
    pub fn dimensions(&self) -> FrameDimensions {
        (self.buffer.width(), self.buffer.height())
    }
}

/// Reject batches that name the same frame twice
pub(crate) fn ensure_unique_frame_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(invalid_parameter(
                "frames",
                &id,
                &"frame identifiers must be unique within a batch",
            ));
        }
    }
    Ok(())
}
