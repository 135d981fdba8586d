//! Chunk symmetry handling
//!
//! A chunk and its mirror images are stored as a single object. Each of the
//! four rectangular symmetries is a pair of independent row and column flips,
//! so every orientation is its own inverse.

use crate::io::configuration::ORIENTATION_VALUES;
use crate::io::error::{ObjectStudioError, invalid_parameter};
use crate::spatial::raster::PixelBuffer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four rectangular symmetries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Content as scanned
    #[default]
    Original,
    /// Columns reversed (mirror across the vertical axis)
    FlipH,
    /// Rows reversed (mirror across the horizontal axis)
    FlipV,
    /// Rows and columns reversed
    FlipBoth,
}

impl Orientation {
    /// All orientations in tie-break order
    pub const ALL: [Self; 4] = [Self::Original, Self::FlipH, Self::FlipV, Self::FlipBoth];

    /// Build an orientation from its (row flip, column flip) bits
    pub const fn from_flips(reverse_rows: bool, reverse_cols: bool) -> Self {
        match (reverse_rows, reverse_cols) {
            (false, false) => Self::Original,
            (false, true) => Self::FlipH,
            (true, false) => Self::FlipV,
            (true, true) => Self::FlipBoth,
        }
    }

    /// The (row flip, column flip) bits
    pub const fn flips(self) -> (bool, bool) {
        match self {
            Self::Original => (false, false),
            Self::FlipH => (false, true),
            Self::FlipV => (true, false),
            Self::FlipBoth => (true, true),
        }
    }

    /// Orientation that undoes this one
    #[must_use]
    pub const fn inverse(self) -> Self {
        self
    }

    /// Orientation equivalent to applying `self` and then `other`
    #[must_use]
    pub const fn then(self, other: Self) -> Self {
        let (rows_a, cols_a) = self.flips();
        let (rows_b, cols_b) = other.flips();
        Self::from_flips(rows_a ^ rows_b, cols_a ^ cols_b)
    }

    /// Transform a buffer by this orientation
    pub fn apply(self, buffer: &PixelBuffer) -> PixelBuffer {
        let (reverse_rows, reverse_cols) = self.flips();
        buffer.flipped(reverse_rows, reverse_cols)
    }

    /// Configuration name of the orientation
    pub const fn name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::FlipH => "flip_h",
            Self::FlipV => "flip_v",
            Self::FlipBoth => "flip_both",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = ObjectStudioError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ORIENTATION_VALUES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, (rows, cols))| Self::from_flips(rows == 1, cols == 1))
            .ok_or_else(|| {
                invalid_parameter("orientation", &name, &"expected original, flip_h, flip_v or flip_both")
            })
    }
}

/// Symmetry-normalized chunk content
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalChunk {
    /// Canonical representative used as the dedup key
    pub content: PixelBuffer,
    /// Orientation that maps `content` back onto the scanned chunk
    pub orientation: Orientation,
}

/// Map a chunk to the canonical member of its symmetry class
///
/// The representative is the transform with the lexicographically smallest
/// row-major RGBA bytes; ties resolve to the earliest entry of
/// `Orientation::ALL`. The returned orientation reproduces `chunk` exactly
/// when applied to the canonical content.
pub fn canonicalize(chunk: &PixelBuffer) -> CanonicalChunk {
    let mut best_orientation = Orientation::Original;
    let mut best_content = chunk.clone();
    let mut best_bytes = chunk.to_bytes();

    for orientation in Orientation::ALL.into_iter().skip(1) {
        let candidate = orientation.apply(chunk);
        let bytes = candidate.to_bytes();
        if bytes < best_bytes {
            best_orientation = orientation;
            best_content = candidate;
            best_bytes = bytes;
        }
    }

    CanonicalChunk {
        content: best_content,
        orientation: best_orientation.inverse(),
    }
}
