//! Tests for pixel buffer construction, sampling and flipping

#[cfg(test)]
mod tests {
    use objectstudio::spatial::raster::{PixelBuffer, TRANSPARENT, is_empty_pixel};

    const RED: [u8; 4] = [255, 0, 0, 255];

    fn numbered(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| [x as u8, y as u8, 0, 255])
    }

    // Tests emptiness is decided by alpha alone
    #[test]
    fn test_empty_pixel_uses_alpha() {
        assert!(is_empty_pixel(&TRANSPARENT));
        assert!(is_empty_pixel(&[12, 34, 56, 0]));
        assert!(!is_empty_pixel(&[0, 0, 0, 1]));
    }

    // Tests from_pixels rejects a length that does not match the shape
    #[test]
    fn test_from_pixels_length_mismatch() {
        let result = PixelBuffer::from_pixels(2, 2, vec![RED; 3]);
        assert!(result.is_err());

        let buffer = PixelBuffer::from_pixels(2, 1, vec![RED, TRANSPARENT]).unwrap();
        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 1);
        assert_eq!(buffer.get(0, 0), Some(RED));
        assert_eq!(buffer.get(1, 0), Some(TRANSPARENT));
    }

    // Tests from_fn passes (x, y) in that order
    #[test]
    fn test_from_fn_coordinates() {
        let buffer = numbered(3, 2);
        assert_eq!(buffer.get(2, 1), Some([2, 1, 0, 255]));
        assert_eq!(buffer.get(3, 0), None);
    }

    // Tests set reports whether the coordinate was inside the buffer
    #[test]
    fn test_set_inside_and_outside() {
        let mut buffer = PixelBuffer::new(2, 2);
        assert!(buffer.set(1, 1, RED));
        assert!(!buffer.set(2, 0, RED));
        assert_eq!(buffer.filled_count(), 1);
        assert!(!buffer.is_blank());
        assert!(buffer.is_empty_at(0, 0));
        assert!(buffer.is_empty_at(5, 5));
    }

    // Tests windows that hang off the edges are padded with transparency
    #[test]
    fn test_window_out_of_bounds() {
        let buffer = numbered(4, 4);
        let window = buffer.window(-1, 2, 3, 3);

        assert_eq!(window.width(), 3);
        assert_eq!(window.height(), 3);
        assert_eq!(window.get(0, 0), Some(TRANSPARENT));
        assert_eq!(window.get(1, 0), Some([0, 2, 0, 255]));
        assert_eq!(window.get(2, 1), Some([1, 3, 0, 255]));
        assert_eq!(window.get(1, 2), Some(TRANSPARENT));
    }

    // Tests each flip reverses the expected axis
    #[test]
    fn test_flipped_axes() {
        let buffer = numbered(3, 2);

        let cols = buffer.flipped(false, true);
        assert_eq!(cols.get(0, 0), Some([2, 0, 0, 255]));

        let rows = buffer.flipped(true, false);
        assert_eq!(rows.get(0, 0), Some([0, 1, 0, 255]));

        let both = buffer.flipped(true, true);
        assert_eq!(both.get(0, 0), Some([2, 1, 0, 255]));

        assert_eq!(buffer.flipped(false, false), buffer);
        assert_eq!(both.flipped(true, true), buffer);
    }

    // Tests bytes are emitted row-major, four per pixel
    #[test]
    fn test_to_bytes_row_major() {
        let buffer = numbered(2, 2);
        assert_eq!(
            buffer.to_bytes(),
            vec![0, 0, 0, 255, 1, 0, 0, 255, 0, 1, 0, 255, 1, 1, 0, 255]
        );
    }
}
