//! Tests for per-frame cell claiming

#[cfg(test)]
mod tests {
    use objectstudio::spatial::coverage::CoverageArena;
    use objectstudio::spatial::grid::{ChunkSize, Position};

    // Tests a fresh arena has every cell free
    #[test]
    fn test_new_arena_is_free() {
        let arena = CoverageArena::new(32, 16);
        assert_eq!(arena.dimensions(), (4, 2));
        assert_eq!(arena.claimed_count(), 0);
        assert!(arena.is_free(Position::new(0, 0), ChunkSize::new(32, 16).unwrap()));
    }

    // Tests claiming a chunk blocks every chunk that overlaps it
    #[test]
    fn test_claim_blocks_overlaps() {
        let mut arena = CoverageArena::new(32, 32);
        let big = ChunkSize::new(16, 16).unwrap();
        let cell = ChunkSize::new(8, 8).unwrap();

        arena.claim(Position::new(8, 8), big);
        assert_eq!(arena.claimed_count(), 4);

        assert!(!arena.is_free(Position::new(16, 16), cell));
        assert!(!arena.is_free(Position::new(0, 0), big));
        assert!(arena.is_free(Position::new(0, 0), cell));
        assert!(arena.is_free(Position::new(24, 24), cell));
    }

    // Tests cells outside the arena count as claimed
    #[test]
    fn test_out_of_bounds_is_claimed() {
        let arena = CoverageArena::new(16, 16);
        assert!(arena.is_claimed(2, 0));
        assert!(!arena.is_free(Position::new(8, 8), ChunkSize::new(16, 8).unwrap()));
    }

    // Tests the display summary
    #[test]
    fn test_display() {
        let mut arena = CoverageArena::new(16, 8);
        arena.claim(Position::new(0, 0), ChunkSize::new(8, 8).unwrap());
        assert_eq!(arena.to_string(), "CoverageArena(1/2 cells claimed)");
    }
}
