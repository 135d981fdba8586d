//! Forward pipeline: frames to objects
//!
//! Each frame is scanned coarse to fine. At every aligned position not yet
//! covered by a larger chunk, the sampled chunk is classified, canonicalized
//! and buffered. Scans run in parallel and touch no shared state; their
//! buffered chunks are committed to the library afterwards, one frame at a
//! time in caller order, which keeps object ids reproducible.

use crate::algorithm::library::{ContentKey, ObjectLibrary};
use crate::algorithm::placement::{
    Frame, FrameDimensions, ObjectId, PlacementRecord, ensure_unique_frame_ids,
};
use crate::analysis::density::is_dense_enough;
use crate::io::configuration::DEFAULT_MIN_ROW_COLUMN_DENSITY;
use crate::io::error::{ObjectStudioError, Result, invalid_parameter};
use crate::spatial::coverage::CoverageArena;
use crate::spatial::grid::{
    ChunkSize, Displacement, Position, aligned_positions, validate_frame_dimensions,
};
use crate::spatial::tiles::{CanonicalChunk, canonicalize};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag for abandoning in-flight frame scans
///
/// Checked between chunk sizes. A cancelled frame commits nothing.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every scan sharing this flag
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once `cancel` has been called
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Parameters controlling chunk extraction and deduplication
#[derive(Clone, Debug)]
pub struct ObjectGeneratorConfig {
    /// Minimum non-empty fraction required in every row and every column
    pub min_row_column_density: f64,
    /// Offset from each grid position to the sampled window
    ///
    /// Applied before classification: the displaced window is what gets
    /// measured, canonicalized and stored.
    pub displace_object: Displacement,
    /// Share objects between chunks of the same frame
    pub intra_scan: bool,
    /// Share objects across the whole batch, including earlier chunks of the
    /// frame being committed; implies `intra_scan`
    pub inter_scan: bool,
    /// Chunk sizes to scan, or `None` for the default hierarchy
    pub scan_chunk_sizes: Option<Vec<ChunkSize>>,
    /// Extract any non-blank chunk at the smallest scanned size, even below
    /// the density threshold
    pub preserve_sparse_cells: bool,
    /// Optional cancellation flag
    pub cancel: Option<CancelFlag>,
}

impl Default for ObjectGeneratorConfig {
    fn default() -> Self {
        Self {
            min_row_column_density: DEFAULT_MIN_ROW_COLUMN_DENSITY,
            displace_object: Displacement::default(),
            intra_scan: true,
            inter_scan: true,
            scan_chunk_sizes: None,
            preserve_sparse_cells: false,
            cancel: None,
        }
    }
}

impl ObjectGeneratorConfig {
    /// Validate the configuration and resolve the chunk sizes in scan order
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the density threshold lies outside
    /// [0, 1] or the chunk size override is empty
    pub fn validate(&self) -> Result<Vec<ChunkSize>> {
        if !(0.0..=1.0).contains(&self.min_row_column_density) {
            return Err(invalid_parameter(
                "min_row_column_density",
                &self.min_row_column_density,
                &"must lie within [0, 1]",
            ));
        }

        self.scan_chunk_sizes
            .as_deref()
            .map_or_else(|| Ok(ChunkSize::default_hierarchy()), ChunkSize::scan_order)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// Accepted chunk buffered until its frame is committed
#[derive(Clone, Debug)]
struct TentativeChunk {
    position: Position,
    canonical: CanonicalChunk,
}

/// Output of the forward pipeline
#[derive(Debug, Default)]
pub struct GeneratedObjects {
    /// Deduplicated objects
    pub library: ObjectLibrary,
    /// Placements in frame order, then scan order
    pub placements: Vec<PlacementRecord>,
    /// Dimensions of every committed frame, in caller order
    pub frame_dimensions: Vec<(String, FrameDimensions)>,
    /// Frames skipped because they failed validation or were cancelled
    pub rejected_frames: Vec<(String, ObjectStudioError)>,
}

impl GeneratedObjects {
    /// Placements targeting one frame
    pub fn placements_for<'a>(
        &'a self,
        frame: &'a str,
    ) -> impl Iterator<Item = &'a PlacementRecord> + 'a {
        self.placements
            .iter()
            .filter(move |placement| placement.frame == frame)
    }
}

/// Decompose a batch of frames into an object library and placements
///
/// # Errors
///
/// Returns an error if:
/// - `frames` is empty (`EmptyInput`)
/// - the configuration is invalid or frame ids repeat (`InvalidConfiguration`)
/// - `inter_scan` is set and any frame fails its scan; the whole batch is
///   abandoned before anything is committed
pub fn generate_objects(
    frames: &[Frame],
    config: &ObjectGeneratorConfig,
) -> Result<GeneratedObjects> {
    if frames.is_empty() {
        return Err(ObjectStudioError::EmptyInput {
            operation: "generate_objects",
        });
    }
    let sizes = config.validate()?;
    ensure_unique_frame_ids(frames.iter().map(|frame| frame.id.as_str()))?;

    let scans: Vec<Result<Vec<TentativeChunk>>> = frames
        .par_iter()
        .map(|frame| scan_frame(frame, &sizes, config))
        .collect();

    let mut generated = GeneratedObjects::default();
    let mut committable = Vec::with_capacity(frames.len());
    for (frame, scan) in frames.iter().zip(scans) {
        match scan {
            Ok(chunks) => committable.push((frame, chunks)),
            Err(error) if config.inter_scan => {
                warn!("Abandoning batch, frame '{}' failed: {error}", frame.id);
                return Err(error);
            }
            Err(error) => {
                warn!("Skipping frame '{}': {error}", frame.id);
                generated.rejected_frames.push((frame.id.clone(), error));
            }
        }
    }

    for (frame, chunks) in committable {
        let before = generated.library.len();
        let placed = commit_frame(&mut generated.library, &frame.id, chunks, config);
        debug!(
            "Frame '{}': {} placements, {} new objects",
            frame.id,
            placed.len(),
            generated.library.len() - before
        );
        generated.placements.extend(placed);
        generated
            .frame_dimensions
            .push((frame.id.clone(), frame.dimensions()));
    }

    info!(
        "Generated {} objects from {} placements across {} frames ({} rejected)",
        generated.library.len(),
        generated.placements.len(),
        generated.frame_dimensions.len(),
        generated.rejected_frames.len()
    );

    Ok(generated)
}

/// Scan one frame coarse to fine and buffer its accepted chunks
fn scan_frame(
    frame: &Frame,
    sizes: &[ChunkSize],
    config: &ObjectGeneratorConfig,
) -> Result<Vec<TentativeChunk>> {
    let (width, height) = frame.dimensions();
    validate_frame_dimensions(&frame.id, width, height)?;

    let mut arena = CoverageArena::new(width, height);
    let mut accepted = Vec::new();
    let smallest = sizes.last().copied();

    for &size in sizes {
        if config.is_cancelled() {
            return Err(ObjectStudioError::Cancelled {
                frame: frame.id.clone(),
            });
        }

        let sparse_pass = config.preserve_sparse_cells && Some(size) == smallest;

        for position in aligned_positions(width, height, size) {
            if !arena.is_free(position, size) {
                continue;
            }

            let (x, y) = config.displace_object.apply(position);
            let chunk = frame.buffer.window(x, y, size.width(), size.height());
            let keep = is_dense_enough(&chunk, config.min_row_column_density)
                || (sparse_pass && !chunk.is_blank());
            if !keep {
                continue;
            }

            arena.claim(position, size);
            trace!(
                "Frame '{}': accepted {}x{} chunk at ({}, {})",
                frame.id,
                size.width(),
                size.height(),
                position.x,
                position.y
            );
            accepted.push(TentativeChunk {
                position,
                canonical: canonicalize(&chunk),
            });
        }
    }

    Ok(accepted)
}

/// Resolve a frame's buffered chunks to objects and emit placements
fn commit_frame(
    library: &mut ObjectLibrary,
    frame: &str,
    chunks: Vec<TentativeChunk>,
    config: &ObjectGeneratorConfig,
) -> Vec<PlacementRecord> {
    let mut frame_objects: HashMap<ContentKey, ObjectId> = HashMap::new();

    chunks
        .into_iter()
        .map(|chunk| {
            let CanonicalChunk {
                content,
                orientation,
            } = chunk.canonical;

            // Inter-scan sharing is batch-wide and already covers this frame
            let object = if config.inter_scan {
                library.lookup_or_insert(content)
            } else if config.intra_scan {
                match frame_objects.entry(ContentKey::of(&content)) {
                    Entry::Occupied(entry) => {
                        library.stats.hits += 1;
                        *entry.get()
                    }
                    Entry::Vacant(entry) => *entry.insert(library.insert_unshared(content)),
                }
            } else {
                library.insert_unshared(content)
            };

            PlacementRecord {
                frame: frame.to_string(),
                object,
                position: chunk.position,
                orientation,
                offset: config.displace_object,
            }
        })
        .collect()
}
