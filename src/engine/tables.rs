use std::sync::OnceLock;

use super::state::SIZE;

/// Precomputed 4-neighbour adjacency for an R×C grid.
///
/// Each cell maps to its in-bounds neighbours in right, down, left, up
/// order. The geometry never changes during a game, so the 4x4 table is
/// built once and shared through `adjacency()`; `engine::new()` forces
/// that early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    rows: usize,
    cols: usize,
    neighbors: Box<[Vec<(usize, usize)>]>,
}

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

impl Adjacency {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut neighbors = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let cell: Vec<(usize, usize)> = DIRECTIONS
                    .iter()
                    .filter_map(|&(dr, dc)| {
                        let nr = r.checked_add_signed(dr)?;
                        let nc = c.checked_add_signed(dc)?;
                        (nr < rows && nc < cols).then_some((nr, nc))
                    })
                    .collect();
                neighbors.push(cell);
            }
        }
        Adjacency {
            rows,
            cols,
            neighbors: neighbors.into_boxed_slice(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// In-bounds neighbours of (`row`, `col`).
    #[inline]
    pub fn neighbors(&self, row: usize, col: usize) -> &[(usize, usize)] {
        debug_assert!(row < self.rows && col < self.cols);
        &self.neighbors[row * self.cols + col]
    }
}

static ADJACENCY: OnceLock<Adjacency> = OnceLock::new();

/// Ensure the 4x4 adjacency table is built.
pub fn init() {
    let _ = adjacency();
}

#[inline(always)]
pub(crate) fn adjacency() -> &'static Adjacency {
    ADJACENCY.get_or_init(|| Adjacency::new(SIZE, SIZE))
}
