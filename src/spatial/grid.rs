//! Base cell geometry and the chunk size hierarchy
//!
//! Every scan position is a multiple of `TILE_SIZE` on both axes, so chunks
//! never straddle a cell boundary. Chunk sizes are whole multiples of the
//! cell and are always attempted largest first.

use crate::io::configuration::{CHUNK_SIZES, TILE_SIZE};
use crate::io::error::{Result, dimension_mismatch, invalid_parameter};
use serde::{Deserialize, Serialize};

/// Candidate chunk dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChunkSize {
    width: usize,
    height: usize,
}

impl ChunkSize {
    /// Create a chunk size aligned to the base cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if either side is zero or not a multiple
    /// of `TILE_SIZE`
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width % TILE_SIZE != 0 || height % TILE_SIZE != 0 {
            return Err(invalid_parameter(
                "scan_chunk_sizes",
                &format!("{width}x{height}"),
                &format!("sides must be non-zero multiples of {TILE_SIZE}"),
            ));
        }
        Ok(Self { width, height })
    }

    /// The default hierarchy, from 64x64 down to the base cell
    pub fn default_hierarchy() -> Vec<Self> {
        CHUNK_SIZES
            .iter()
            .map(|&(width, height)| Self { width, height })
            .collect()
    }

    /// Normalize a caller-supplied size list into scan order
    ///
    /// Repeated sizes are dropped, then the list is stably sorted by area,
    /// largest first, so equal-area sizes keep the caller's order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an empty list
    pub fn scan_order(sizes: &[Self]) -> Result<Vec<Self>> {
        if sizes.is_empty() {
            return Err(invalid_parameter(
                "scan_chunk_sizes",
                &"[]",
                &"at least one chunk size is required",
            ));
        }

        let mut ordered: Vec<Self> = Vec::with_capacity(sizes.len());
        for size in sizes {
            if !ordered.contains(size) {
                ordered.push(*size);
            }
        }
        ordered.sort_by(|a, b| b.area().cmp(&a.area()));
        Ok(ordered)
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Pixel area
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Size in base cells as (columns, rows)
    pub const fn cells(&self) -> (usize, usize) {
        (self.width / TILE_SIZE, self.height / TILE_SIZE)
    }

    /// True if the chunk at `position` lies entirely inside a frame
    pub const fn fits(&self, position: Position, frame_width: usize, frame_height: usize) -> bool {
        position.x + self.width <= frame_width && position.y + self.height <= frame_height
    }
}

/// Top-left corner of a chunk in frame pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column of the top-left pixel
    pub x: usize,
    /// Row of the top-left pixel
    pub y: usize,
}

impl Position {
    /// Create a position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Base cell containing this position as (column, row)
    pub const fn cell(&self) -> (usize, usize) {
        (self.x / TILE_SIZE, self.y / TILE_SIZE)
    }
}

/// Offset applied between the scan grid and the sampled content
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Displacement {
    /// Horizontal offset in pixels
    pub dx: i32,
    /// Vertical offset in pixels
    pub dy: i32,
}

impl Displacement {
    /// Create a displacement
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// True when the offset is (0, 0)
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Shift a grid position by this offset, saturating at the `i64` range
    pub const fn apply(&self, position: Position) -> (i64, i64) {
        (
            signed(position.x).saturating_add(self.dx as i64),
            signed(position.y).saturating_add(self.dy as i64),
        )
    }
}

/// Axis-aligned rectangle in signed frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x: i64,
    /// Top edge (inclusive)
    pub y: i64,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Rect {
    /// Right edge (exclusive)
    pub const fn right(&self) -> i64 {
        self.x.saturating_add(signed(self.width))
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i64 {
        self.y.saturating_add(signed(self.height))
    }

    /// True if the two rectangles share at least one pixel
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// Coordinates past i64::MAX clamp to it
const fn signed(value: usize) -> i64 {
    if value > i64::MAX as usize {
        i64::MAX
    } else {
        value as i64
    }
}

/// Reject frames that are smaller than, or not aligned to, the base cell
///
/// # Errors
///
/// Returns `DimensionMismatch` describing the violated constraint
pub fn validate_frame_dimensions(frame: &str, width: usize, height: usize) -> Result<()> {
    if width < TILE_SIZE || height < TILE_SIZE {
        return Err(dimension_mismatch(
            frame,
            width,
            height,
            &format!("frame is smaller than the {TILE_SIZE}x{TILE_SIZE} base cell"),
        ));
    }
    if width % TILE_SIZE != 0 || height % TILE_SIZE != 0 {
        return Err(dimension_mismatch(
            frame,
            width,
            height,
            &format!("frame sides must be multiples of {TILE_SIZE}"),
        ));
    }
    Ok(())
}

/// Aligned positions where `size` fits inside the frame, in row-major order
pub fn aligned_positions(
    frame_width: usize,
    frame_height: usize,
    size: ChunkSize,
) -> impl Iterator<Item = Position> {
    let rows = if size.height <= frame_height {
        (frame_height - size.height) / TILE_SIZE + 1
    } else {
        0
    };
    let cols = if size.width <= frame_width {
        (frame_width - size.width) / TILE_SIZE + 1
    } else {
        0
    };

    (0..rows).flat_map(move |row| {
        (0..cols).map(move |col| Position::new(col * TILE_SIZE, row * TILE_SIZE))
    })
}
