//! Row and column fill analysis for candidate chunks

use crate::spatial::raster::{PixelBuffer, is_empty_pixel};

/// Fill fractions of a chunk along both axes
#[derive(Clone, Debug, PartialEq)]
pub struct DensityProfile {
    /// Fraction of non-empty pixels in each row, top to bottom
    pub rows: Vec<f64>,
    /// Fraction of non-empty pixels in each column, left to right
    pub columns: Vec<f64>,
    /// Total number of non-empty pixels
    pub filled: usize,
}

impl DensityProfile {
    /// Measure a chunk
    pub fn measure(chunk: &PixelBuffer) -> Self {
        let view = chunk.view();
        let (height, width) = view.dim();

        let rows = view
            .rows()
            .into_iter()
            .map(|row| fraction(row.iter().filter(|pixel| !is_empty_pixel(pixel)).count(), width))
            .collect();
        let columns = view
            .columns()
            .into_iter()
            .map(|column| {
                fraction(
                    column.iter().filter(|pixel| !is_empty_pixel(pixel)).count(),
                    height,
                )
            })
            .collect();

        Self {
            rows,
            columns,
            filled: chunk.filled_count(),
        }
    }

    /// Sparsest row fraction (0.0 for a zero-height chunk)
    pub fn min_row(&self) -> f64 {
        minimum(&self.rows)
    }

    /// Sparsest column fraction (0.0 for a zero-width chunk)
    pub fn min_column(&self) -> f64 {
        minimum(&self.columns)
    }

    /// Accept when both the sparsest row and the sparsest column meet the
    /// threshold and the chunk holds at least one non-empty pixel
    pub fn accepts(&self, min_row_column_density: f64) -> bool {
        self.filled > 0
            && self.min_row() >= min_row_column_density
            && self.min_column() >= min_row_column_density
    }
}

/// Classify a chunk as object material or background
///
/// A diagonal streak is rejected even when its overall fill is high, because
/// the sparsest row and column are what count.
pub fn is_dense_enough(chunk: &PixelBuffer, min_row_column_density: f64) -> bool {
    DensityProfile::measure(chunk).accepts(min_row_column_density)
}

fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn minimum(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .reduce(f64::min)
        .unwrap_or(0.0)
}
