//! Tests for placement records and frames

#[cfg(test)]
mod tests {
    use objectstudio::algorithm::placement::{Frame, ObjectId, PlacementRecord};
    use objectstudio::spatial::grid::{Displacement, Position};
    use objectstudio::spatial::raster::PixelBuffer;
    use objectstudio::spatial::tiles::Orientation;

    fn placement(offset: Displacement) -> PlacementRecord {
        PlacementRecord {
            frame: "walk_0".to_string(),
            object: ObjectId(3),
            position: Position::new(16, 8),
            orientation: Orientation::FlipV,
            offset,
        }
    }

    // Tests the destination adds the offset to the grid position
    #[test]
    fn test_destination_and_footprint() {
        let record = placement(Displacement::new(-2, 1));
        assert_eq!(record.destination(), (14, 9));

        let rect = record.footprint(8, 16);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (14, 9, 8, 16));
    }

    // Tests serialized placements use snake_case orientations and bare ids
    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(placement(Displacement::default())).unwrap();
        assert_eq!(value["orientation"], "flip_v");
        assert_eq!(value["object"], 3);
        assert_eq!(value["position"]["x"], 16);
    }

    // Tests a missing offset defaults to zero when parsing
    #[test]
    fn test_offset_defaults_when_absent() {
        let text = r#"{"frame":"a","object":0,"position":{"x":0,"y":8},"orientation":"original"}"#;
        let record: PlacementRecord = serde_json::from_str(text).unwrap();
        assert!(record.offset.is_zero());
        assert_eq!(record.object.to_string(), "0");
    }

    // Tests frame dimensions come from the buffer
    #[test]
    fn test_frame_dimensions() {
        let frame = Frame::new("idle", PixelBuffer::new(24, 16));
        assert_eq!(frame.id, "idle");
        assert_eq!(frame.dimensions(), (24, 16));
    }
}
