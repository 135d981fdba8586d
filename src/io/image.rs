//! Conversion between `image` RGBA buffers and pixel buffers
//!
//! Decoding and encoding files stays with the caller; these helpers only move
//! pixels between in-memory representations.

use crate::spatial::raster::PixelBuffer;
use image::{Rgba, RgbaImage};

/// Copy an RGBA image into a pixel buffer
pub fn buffer_from_image(image: &RgbaImage) -> PixelBuffer {
    PixelBuffer::from_fn(image.width() as usize, image.height() as usize, |x, y| {
        image
            .get_pixel_checked(x as u32, y as u32)
            .map_or([0, 0, 0, 0], |pixel| pixel.0)
    })
}

/// Copy a pixel buffer into an RGBA image
pub fn image_from_buffer(buffer: &PixelBuffer) -> RgbaImage {
    let mut image = RgbaImage::new(buffer.width() as u32, buffer.height() as u32);
    for (x, y, pixel) in buffer.indexed_pixels() {
        if let Some(target) = image.get_pixel_mut_checked(x as u32, y as u32) {
            *target = Rgba(pixel);
        }
    }
    image
}
