//! Owned RGBA pixel buffers with an explicit emptiness predicate
//!
//! Frames and objects are both stored as a row-major `Array2` of RGBA pixels.
//! A pixel is empty when its alpha channel is zero, regardless of its color
//! channels.

use crate::io::error::{Result, dimension_mismatch};
use ndarray::{Array2, ArrayView2, s};

/// RGBA pixel sample
pub type Pixel = [u8; 4];

/// Canonical empty pixel written into freshly allocated buffers
pub const TRANSPARENT: Pixel = [0, 0, 0, 0];

/// Check whether a pixel counts as background
pub const fn is_empty_pixel(pixel: &Pixel) -> bool {
    pixel[3] == 0
}

/// Rectangular grid of RGBA pixels
///
/// Indexed by `(x, y)` in the public API; stored as `(row, col)` internally.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    pixels: Array2<Pixel>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), TRANSPARENT),
        }
    }

    /// Build a buffer from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `pixels.len()` differs from `width * height`
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        let pixels = Array2::from_shape_vec((height, width), pixels)
            .map_err(|e| dimension_mismatch("<pixels>", width, height, &e))?;
        Ok(Self { pixels })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Pixel,
    {
        Self {
            pixels: Array2::from_shape_fn((height, width), |(row, col)| f(col, row)),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        self.pixels.get((y, x)).copied()
    }

    /// Overwrite the pixel at `(x, y)`
    ///
    /// Returns `false` when the coordinate lies outside the buffer.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> bool {
        self.pixels.get_mut((y, x)).is_some_and(|slot| {
            *slot = pixel;
            true
        })
    }

    /// Empty test with out-of-bounds coordinates treated as background
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_none_or(|pixel| is_empty_pixel(&pixel))
    }

    /// True when no pixel in the buffer has content
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(is_empty_pixel)
    }

    /// Number of pixels with content
    pub fn filled_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| !is_empty_pixel(pixel)).count()
    }

    /// Read-only `(row, col)` view of the pixels
    pub fn view(&self) -> ArrayView2<'_, Pixel> {
        self.pixels.view()
    }

    /// Iterate `(x, y, pixel)` in row-major order
    pub fn indexed_pixels(&self) -> impl Iterator<Item = (usize, usize, Pixel)> + '_ {
        self.pixels
            .indexed_iter()
            .map(|((row, col), pixel)| (col, row, *pixel))
    }

    /// Copy a `width` x `height` window whose top-left corner is `(x, y)`
    ///
    /// The origin may be negative or run past the edges; samples outside the
    /// buffer come back as `TRANSPARENT`.
    pub fn window(&self, x: i64, y: i64, width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |col, row| {
            let source_x = usize::try_from(x + col as i64).ok();
            let source_y = usize::try_from(y + row as i64).ok();
            source_x
                .zip(source_y)
                .and_then(|(sx, sy)| self.get(sx, sy))
                .unwrap_or(TRANSPARENT)
        })
    }

    /// Copy of the buffer with rows and/or columns reversed
    #[must_use]
    pub fn flipped(&self, reverse_rows: bool, reverse_cols: bool) -> Self {
        let pixels = match (reverse_rows, reverse_cols) {
            (false, false) => self.pixels.clone(),
            (true, false) => self.pixels.slice(s![..;-1, ..]).to_owned(),
            (false, true) => self.pixels.slice(s![.., ..;-1]).to_owned(),
            (true, true) => self.pixels.slice(s![..;-1, ..;-1]).to_owned(),
        };
        Self { pixels }
    }

    /// Row-major RGBA bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|pixel| pixel.iter().copied()).collect()
    }
}
