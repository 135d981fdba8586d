//! Scan constants and configuration defaults

/// Edge length of the base grid cell in pixels
pub const TILE_SIZE: usize = 8;

/// Chunk sizes as (width, height), in the order they are scanned
pub const CHUNK_SIZES: [(usize, usize); 12] = [
    (64, 64),
    (64, 32),
    (32, 64),
    (32, 32),
    (32, 16),
    (16, 32),
    (32, 8),
    (8, 32),
    (16, 16),
    (16, 8),
    (8, 16),
    (8, 8),
];

/// Orientation names with their (row flip, column flip) bits
pub const ORIENTATION_VALUES: [(&str, (u8, u8)); 4] = [
    ("original", (0, 0)),
    ("flip_h", (0, 1)),
    ("flip_v", (1, 0)),
    ("flip_both", (1, 1)),
];

// Default values for configurable parameters
/// Minimum fraction of non-empty pixels in every row and column of a chunk
pub const DEFAULT_MIN_ROW_COLUMN_DENSITY: f64 = 0.5;

/// Overlap policy used when none is requested
pub const DEFAULT_OVERLAP_POLICY: &str = "none";

/// Names accepted for the `avoid_overlap` setting
pub const OVERLAP_POLICY_NAMES: [&str; 3] = ["none", "skip", "blend"];
