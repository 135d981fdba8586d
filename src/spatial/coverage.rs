use crate::io::configuration::TILE_SIZE;
use crate::spatial::grid::{ChunkSize, Position};
use bitvec::prelude::*;
use std::fmt;

/// Per-frame bitmap of base cells already claimed by an accepted chunk
///
/// One arena is created for every frame scan and passed into each scanning
/// call, so frames can be scanned on separate threads.
#[derive(Clone, Debug)]
pub struct CoverageArena {
    claimed: BitVec,
    columns: usize,
    rows: usize,
}

impl CoverageArena {
    /// Create an arena with every cell of a `width` x `height` frame unclaimed
    pub fn new(width: usize, height: usize) -> Self {
        let columns = width / TILE_SIZE;
        let rows = height / TILE_SIZE;
        Self {
            claimed: bitvec![0; columns * rows],
            columns,
            rows,
        }
    }

    /// Arena size in cells as (columns, rows)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Test a single cell; cells outside the arena count as claimed
    pub fn is_claimed(&self, column: usize, row: usize) -> bool {
        if column >= self.columns || row >= self.rows {
            return true;
        }
        self.claimed.get(row * self.columns + column).as_deref() == Some(&true)
    }

    /// True if every cell under the chunk is still unclaimed
    pub fn is_free(&self, position: Position, size: ChunkSize) -> bool {
        let (first_column, first_row) = position.cell();
        let (columns, rows) = size.cells();
        (first_row..first_row + rows).all(|row| {
            (first_column..first_column + columns).all(|column| !self.is_claimed(column, row))
        })
    }

    /// Mark every cell under the chunk as claimed
    pub fn claim(&mut self, position: Position, size: ChunkSize) {
        let (first_column, first_row) = position.cell();
        let (columns, rows) = size.cells();
        for row in first_row..(first_row + rows).min(self.rows) {
            for column in first_column..(first_column + columns).min(self.columns) {
                self.claimed.set(row * self.columns + column, true);
            }
        }
    }

    /// Number of claimed cells
    pub fn claimed_count(&self) -> usize {
        self.claimed.count_ones()
    }
}

impl fmt::Display for CoverageArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoverageArena({}/{} cells claimed)",
            self.claimed_count(),
            self.columns * self.rows
        )
    }
}
