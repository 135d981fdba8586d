//! Inverse pipeline: objects and placements back to frames

use crate::algorithm::library::ObjectLibrary;
use crate::algorithm::placement::{
    Frame, FrameDimensions, PlacementRecord, ensure_unique_frame_ids,
};
use crate::io::configuration::OVERLAP_POLICY_NAMES;
use crate::io::error::{ObjectStudioError, Result, dimension_mismatch, invalid_parameter};
use crate::spatial::grid::Rect;
use crate::spatial::raster::{PixelBuffer, is_empty_pixel};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How colliding placements are resolved while compositing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Draw everything in order; every object pixel overwrites, later wins
    #[default]
    None,
    /// Skip a placement whose footprint touches an already drawn one
    Skip,
    /// Draw in order, but empty object pixels never overwrite
    Blend,
}

impl OverlapPolicy {
    /// Configuration name of the policy
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Skip => "skip",
            Self::Blend => "blend",
        }
    }

    /// True if the policy may drop or alter placed content
    pub const fn is_lossy(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverlapPolicy {
    type Err = ObjectStudioError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "none" => Ok(Self::None),
            "skip" => Ok(Self::Skip),
            "blend" => Ok(Self::Blend),
            _ => Err(invalid_parameter(
                "avoid_overlap",
                &name,
                &format!("expected one of {}", OVERLAP_POLICY_NAMES.join(", ")),
            )),
        }
    }
}

/// Parameters controlling frame reconstruction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FramesGeneratorConfig {
    /// Collision handling between placements of one frame
    pub avoid_overlap: OverlapPolicy,
}

impl FramesGeneratorConfig {
    /// Build a configuration from an overlap policy name
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an unknown policy name
    pub fn from_policy_name(avoid_overlap: &str) -> Result<Self> {
        Ok(Self {
            avoid_overlap: avoid_overlap.parse()?,
        })
    }
}

/// Output of the inverse pipeline
#[derive(Debug, Default)]
pub struct GeneratedFrames {
    /// Reconstructed frames in the order their dimensions were supplied
    pub frames: Vec<Frame>,
    /// Frames whose reconstruction was aborted
    pub failed_frames: Vec<(String, ObjectStudioError)>,
}

impl GeneratedFrames {
    /// Reconstructed frame with the given id
    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.frames.iter().find(|frame| frame.id == id)
    }
}

/// Rebuild frames by compositing library objects at their placements
///
/// Placements of each frame are drawn in ascending (y, x) order of their
/// destination; placements sharing a destination keep their input order.
/// Frames are composited in parallel against the read-only library.
///
/// # Errors
///
/// Returns an error if:
/// - `frame_dimensions` is empty (`EmptyInput`)
/// - a frame id repeats (`InvalidConfiguration`)
/// - a placement targets a frame missing from `frame_dimensions` (`UnknownFrame`)
///
/// Per-frame failures, such as an unresolved object or a placement lying
/// wholly outside its frame (`PlacementOutOfBounds`), are reported in
/// `GeneratedFrames::failed_frames` and do not stop sibling frames.
pub fn generate_frames(
    library: &ObjectLibrary,
    placements: &[PlacementRecord],
    frame_dimensions: &[(String, FrameDimensions)],
    config: &FramesGeneratorConfig,
) -> Result<GeneratedFrames> {
    if frame_dimensions.is_empty() {
        return Err(ObjectStudioError::EmptyInput {
            operation: "generate_frames",
        });
    }
    ensure_unique_frame_ids(frame_dimensions.iter().map(|(id, _)| id.as_str()))?;

    let mut by_frame: HashMap<&str, Vec<&PlacementRecord>> = frame_dimensions
        .iter()
        .map(|(id, _)| (id.as_str(), Vec::new()))
        .collect();
    for placement in placements {
        by_frame
            .get_mut(placement.frame.as_str())
            .ok_or_else(|| ObjectStudioError::UnknownFrame {
                frame: placement.frame.clone(),
            })?
            .push(placement);
    }

    let results: Vec<Result<Frame>> = frame_dimensions
        .par_iter()
        .map(|(id, dimensions)| {
            let frame_placements = by_frame.get(id.as_str()).map_or(&[][..], Vec::as_slice);
            compose_frame(library, id, *dimensions, frame_placements, config.avoid_overlap)
        })
        .collect();

    let mut generated = GeneratedFrames::default();
    for ((id, _), result) in frame_dimensions.iter().zip(results) {
        match result {
            Ok(frame) => generated.frames.push(frame),
            Err(error) => {
                warn!("Reconstruction of frame '{id}' aborted: {error}");
                generated.failed_frames.push((id.clone(), error));
            }
        }
    }

    info!(
        "Reconstructed {} frames from {} placements ({} failed)",
        generated.frames.len(),
        placements.len(),
        generated.failed_frames.len()
    );

    Ok(generated)
}

fn compose_frame(
    library: &ObjectLibrary,
    frame: &str,
    (width, height): FrameDimensions,
    placements: &[&PlacementRecord],
    policy: OverlapPolicy,
) -> Result<Frame> {
    if width == 0 || height == 0 {
        return Err(dimension_mismatch(
            frame,
            width,
            height,
            &"frame dimensions must be non-zero",
        ));
    }

    let mut ordered = placements.to_vec();
    ordered.sort_by_key(|placement| {
        let (x, y) = placement.destination();
        (y, x)
    });

    let mut canvas = PixelBuffer::new(width, height);
    let canvas_rect = Rect {
        x: 0,
        y: 0,
        width,
        height,
    };
    let mut drawn: Vec<Rect> = Vec::with_capacity(ordered.len());
    let mut skipped = 0usize;

    for placement in ordered {
        let record = library.get(placement.object).ok_or_else(|| {
            ObjectStudioError::UnresolvedObjectReference {
                frame: frame.to_string(),
                object: placement.object.index(),
                library_size: library.len(),
            }
        })?;

        let footprint = placement.footprint(record.content.width(), record.content.height());
        if !footprint.intersects(&canvas_rect) {
            return Err(ObjectStudioError::PlacementOutOfBounds {
                frame: frame.to_string(),
                object: placement.object.index(),
                x: footprint.x,
                y: footprint.y,
                width,
                height,
            });
        }
        if policy == OverlapPolicy::Skip && drawn.iter().any(|rect| rect.intersects(&footprint)) {
            skipped += 1;
            continue;
        }

        let content = placement.orientation.apply(&record.content);
        draw(&mut canvas, &content, footprint, policy == OverlapPolicy::Blend);
        drawn.push(footprint);
    }

    if skipped > 0 {
        warn!("Frame '{frame}': skipped {skipped} overlapping placements");
    }
    debug!("Frame '{frame}': composited {} placements", drawn.len());

    Ok(Frame::new(frame, canvas))
}

// Pixels falling outside the canvas are clipped
fn draw(canvas: &mut PixelBuffer, content: &PixelBuffer, footprint: Rect, keep_background: bool) {
    for (x, y, pixel) in content.indexed_pixels() {
        if keep_background && is_empty_pixel(&pixel) {
            continue;
        }
        let target_x = usize::try_from(footprint.x.saturating_add(x as i64));
        let target_y = usize::try_from(footprint.y.saturating_add(y as i64));
        if let (Ok(tx), Ok(ty)) = (target_x, target_y) {
            canvas.set(tx, ty, pixel);
        }
    }
}
