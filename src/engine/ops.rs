use rand::Rng;

use super::state::{Board, Line, Move, MoveResult, Score, Tile, SIZE};
use super::tables::adjacency;

/// Slide all non-zero values to the front of the line, keeping their order.
///
/// Returns the compacted line and whether anything moved.
pub fn compress(line: Line) -> (Line, bool) {
    let mut out = [0; SIZE];
    let mut next = 0;
    for &val in line.iter().filter(|&&v| v != 0) {
        out[next] = val;
        next += 1;
    }
    (out, out != line)
}

/// Merge equal neighbours in a single left-to-right pass.
///
/// When `line[j]` and `line[j + 1]` are equal and non-zero, `line[j]` doubles
/// and `line[j + 1]` becomes 0. The zeroed cell cannot take part in another
/// merge during the same pass, so each tile merges at most once.
/// A pair whose doubled value would not fit in a `Tile` stays put.
pub fn merge(mut line: Line) -> (Line, bool, Score) {
    let mut changed = false;
    let mut score: Score = 0;
    for j in 0..SIZE - 1 {
        if let Some(merged) = merged_value(line[j], line[j + 1]) {
            line[j] = merged;
            score = score.saturating_add(merged);
            line[j + 1] = 0;
            changed = true;
        }
    }
    (line, changed, score)
}

/// Value produced by merging `a` into `b`, if they can merge.
#[inline]
fn merged_value(a: Tile, b: Tile) -> Option<Tile> {
    if a != 0 && a == b {
        a.checked_mul(2)
    } else {
        None
    }
}

/// Move one line toward index 0: compress, merge, then close the gaps.
pub fn shift_line(line: Line) -> (Line, bool, Score) {
    let (line, compressed) = compress(line);
    let (line, merged, score) = merge(line);
    let (line, _) = compress(line);
    (line, compressed || merged, score)
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: Board, direction: Move) -> MoveResult {
    match direction {
        Move::Left => shift_rows_left(board),
        Move::Right => {
            let res = shift_rows_left(reverse(board));
            MoveResult { board: reverse(res.board), ..res }
        }
        Move::Up => {
            let res = shift_rows_left(transpose(board));
            MoveResult { board: transpose(res.board), ..res }
        }
        Move::Down => {
            let res = shift(transpose(board), Move::Right);
            MoveResult { board: transpose(res.board), ..res }
        }
    }
}

fn shift_rows_left(board: Board) -> MoveResult {
    let mut rows = board.0;
    let mut changed = false;
    let mut score: Score = 0;
    for row in rows.iter_mut() {
        let (new_row, row_changed, row_score) = shift_line(*row);
        *row = new_row;
        changed |= row_changed;
        score = score.saturating_add(row_score);
    }
    MoveResult { board: Board(rows), changed, score }
}

/// Swap rows and columns.
pub fn transpose(board: Board) -> Board {
    let mut out = [[0; SIZE]; SIZE];
    for (r, row) in board.0.iter().enumerate() {
        for (c, &val) in row.iter().enumerate() {
            out[c][r] = val;
        }
    }
    Board(out)
}

/// Mirror every row horizontally.
pub fn reverse(board: Board) -> Board {
    let mut rows = board.0;
    for row in rows.iter_mut() {
        row.reverse();
    }
    Board(rows)
}

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// # Panics
///
/// Panics if `board` has no empty cell.
pub fn spawn_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty = count_empty(board);
    assert!(empty > 0, "spawn_tile called on a full board");
    let index = rng.gen_range(0..empty);
    let tile = generate_random_tile(rng);
    let mut cells = board.0;
    if let Some(cell) = cells
        .iter_mut()
        .flat_map(|row| row.iter_mut())
        .filter(|cell| **cell == 0)
        .nth(index)
    {
        *cell = tile;
    }
    Board(cells)
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}

/// True if any cell has an in-bounds neighbour that is empty or can merge
/// with it.
///
/// An all-empty board counts as playable.
pub fn has_valid_moves(board: Board) -> bool {
    let adj = adjacency();
    (0..SIZE).any(|r| {
        (0..SIZE).any(|c| {
            let val = board.0[r][c];
            adj.neighbors(r, c).iter().any(|&(nr, nc)| {
                let other = board.0[nr][nc];
                other == 0 || merged_value(val, other).is_some()
            })
        })
    })
}

/// True if `target` appears anywhere on the board.
pub fn contains_value(board: Board, target: Tile) -> bool {
    board.tiles().any(|v| v == target)
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.tiles().filter(|&v| v == 0).count()
}

pub fn highest_tile(board: Board) -> Tile {
    board.tiles().max().unwrap_or(0)
}

/// Sum of every cell value, saturating at `Tile::MAX`.
pub fn tile_sum(board: Board) -> Tile {
    board.tiles().fold(0, Tile::saturating_add)
}
