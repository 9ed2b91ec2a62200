//! Engine module: 4x4 2048 board, pure shift/merge ops, spawn and
//! terminal-state queries. Public API stays small and ergonomic.
//!
//! - `Board` is the 4x4 state with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - The neighbour lookup used by `has_valid_moves` lives in `tables`.

mod ops;
pub mod state;
mod tables;

pub use state::{Board, BoardError, Line, Move, MoveResult, Score, Tile};
pub use tables::Adjacency;

pub use ops::{
    compress, contains_value, count_empty, has_valid_moves, highest_tile, merge, reverse, shift,
    shift_line, spawn_tile, tile_sum, transpose,
};

/// Initialize internal precomputed tables on first use.
/// Safe to call multiple times.
pub fn new() {
    tables::init();
}
