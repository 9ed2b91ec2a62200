use rand::Rng;
use std::fmt;

use super::ops;

pub(crate) const SIZE: usize = 4;

/// Value held by a single cell. 0 means empty.
pub type Tile = u64;
/// Points awarded by merges.
pub type Score = u64;
/// One row (or, after transposing, one column) of the board.
pub type Line = [Tile; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in the order the front-end lists them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Map a WASD key (case-insensitive) to a direction.
    ///
    /// ```
    /// use game_2048::engine::Move;
    /// assert_eq!(Move::from_key('W'), Some(Move::Up));
    /// assert_eq!(Move::from_key('x'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Move> {
        match key.to_ascii_lowercase() {
            'w' => Some(Move::Up),
            's' => Some(Move::Down),
            'a' => Some(Move::Left),
            'd' => Some(Move::Right),
            _ => None,
        }
    }
}

/// Outcome of sliding the whole board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// True iff at least one cell differs from the input board.
    pub changed: bool,
    /// Sum of the values produced by merges during this move.
    pub score: Score,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 4 rows, found {found}")]
    RowCount { found: usize },
    #[error("row {row}: expected 4 cells, found {found}")]
    RowLength { row: usize, found: usize },
    #[error("cell ({row}, {col}) is negative: {value}")]
    Negative { row: usize, col: usize, value: i64 },
    #[error("cell ({row}, {col}) is not an integer")]
    NonInteger { row: usize, col: usize },
}

/// A 4x4 2048 board, stored row-major.
///
/// Boards are values: every transform returns a new `Board` and leaves the
/// input untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) [Line; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Wrap an already-typed grid. Any non-negative value is accepted.
    #[inline]
    pub const fn from_cells(cells: [Line; SIZE]) -> Self {
        Board(cells)
    }

    /// Build a board from user-supplied rows, validating shape and sign.
    ///
    /// Values need not be powers of two; only the 4x4 shape and
    /// non-negativity are checked. Nothing is constructed on failure.
    ///
    /// ```
    /// use game_2048::engine::{Board, BoardError};
    /// let b = Board::from_rows(&[[1, 2, 3, 4], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.get(0, 2), 3);
    /// assert!(matches!(
    ///     Board::from_rows(&[[0i64; 4]; 3]),
    ///     Err(BoardError::RowCount { found: 3 })
    /// ));
    /// ```
    pub fn from_rows<T: AsRef<[i64]>>(rows: &[T]) -> Result<Self, BoardError> {
        if rows.len() != SIZE {
            return Err(BoardError::RowCount { found: rows.len() });
        }
        let mut cells = [[0; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != SIZE {
                return Err(BoardError::RowLength { row: r, found: row.len() });
            }
            for (c, &value) in row.iter().enumerate() {
                if value < 0 {
                    return Err(BoardError::Negative { row: r, col: c, value });
                }
                cells[r][c] = value as Tile;
            }
        }
        Ok(Board(cells))
    }

    /// Standard opening: an empty board with two random tiles.
    ///
    /// ```
    /// use game_2048::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// assert_eq!(Board::standard(&mut rng).count_empty(), 14);
    /// ```
    pub fn standard<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Board::EMPTY.with_random_tile(rng).with_random_tile(rng)
    }

    /// Borrow the rows of the board.
    #[inline]
    pub fn rows(&self) -> &[Line; SIZE] {
        &self.0
    }

    /// Value at (`row`, `col`), 0 if empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Return the result of sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use game_2048::engine::{Board, Move};
    /// let b = Board::from_cells([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// let r = b.shift(Move::Left);
    /// assert_eq!(r.board.rows()[0], [4, 0, 0, 0]);
    /// assert!(r.changed);
    /// assert_eq!(r.score, 4);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> MoveResult {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the board has no empty cell. Callers must check
    /// [`Board::count_empty`] first; a changed move always leaves one.
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        ops::spawn_tile(self, rng)
    }

    /// True while at least one cell has an empty or equal neighbour.
    #[inline]
    pub fn has_valid_moves(self) -> bool {
        ops::has_valid_moves(self)
    }

    /// True if `target` appears anywhere on the board.
    #[inline]
    pub fn contains_value(self, target: Tile) -> bool {
        ops::contains_value(self, target)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Return the highest tile value present on the board (0 when empty).
    #[inline]
    pub fn highest_tile(self) -> Tile {
        ops::highest_tile(self)
    }

    /// Sum of every cell value.
    #[inline]
    pub fn tile_sum(self) -> Tile {
        ops::tile_sum(self)
    }

    /// Iterate over cell values in row-major order.
    #[inline]
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(SIZE * 8 - 1);
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{}", separator)?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// Center a cell value in a 7-character slot; empty cells are blank.
fn format_val(val: Tile) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn from_rows_accepts_non_powers_of_two() {
        let b = Board::from_rows(&[[1, 2, 3, 4], [5, 6, 7, 8], [0; 4], [0; 4]]).unwrap();
        assert_eq!(b.rows()[1], [5, 6, 7, 8]);
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        let short: Vec<Vec<i64>> = vec![vec![0; 4]; 5];
        assert_eq!(
            Board::from_rows(&short),
            Err(BoardError::RowCount { found: 5 })
        );
        let ragged: Vec<Vec<i64>> = vec![vec![0; 4], vec![0; 4], vec![0; 3], vec![0; 4]];
        assert_eq!(
            Board::from_rows(&ragged),
            Err(BoardError::RowLength { row: 2, found: 3 })
        );
    }

    #[test]
    fn from_rows_rejects_negative() {
        let err = Board::from_rows(&[[0, 0, 0, 0], [0, -2, 0, 0], [0; 4], [0; 4]]).unwrap_err();
        assert_eq!(err, BoardError::Negative { row: 1, col: 1, value: -2 });
    }

    #[test]
    fn standard_start_has_two_small_tiles() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let b = Board::standard(&mut rng);
            let tiles: Vec<Tile> = b.tiles().filter(|&v| v != 0).collect();
            assert_eq!(tiles.len(), 2);
            assert!(tiles.iter().all(|&v| v == 2 || v == 4));
        }
    }

    #[test]
    fn move_from_key() {
        assert_eq!(Move::from_key('a'), Some(Move::Left));
        assert_eq!(Move::from_key('D'), Some(Move::Right));
        assert_eq!(Move::from_key('s'), Some(Move::Down));
        assert_eq!(Move::from_key('r'), None);
    }

    #[test]
    fn display_renders_four_rows() {
        let b = Board::from_cells([[2, 0, 0, 2048], [0; 4], [0; 4], [0; 4]]);
        let text = b.to_string();
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("   2   |"));
        assert!(text.lines().next().unwrap().ends_with("  2048 "));
    }
}
