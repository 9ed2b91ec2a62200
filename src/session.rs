//! Game session: owns the board, running score and score history, and turns
//! direction commands into engine calls.
//!
//! A session is `Playing` until a move either produces the target tile
//! (`Won`) or leaves the board with no possible move (`Lost`). Both terminal
//! states stop move processing; only [`Session::restart`] resumes play.
//!
//! ```
//! use game_2048::engine::Move;
//! use game_2048::session::{Session, Status};
//!
//! let mut session = Session::seeded(42);
//! let report = session.apply_move(Move::Left);
//! assert_eq!(report.status, Status::Playing);
//! assert_eq!(report.score, session.score());
//! ```

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::engine::{Board, Move, Score, Tile};

/// Tile value that wins the game unless configured otherwise.
pub const DEFAULT_TARGET: Tile = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Status::Playing
    }
}

/// What a single input did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
    /// False for no-ops: unchanged moves, ignored keys, input while terminal.
    pub changed: bool,
    pub board: Board,
    pub score: Score,
}

pub struct Session<R: Rng = StdRng> {
    board: Board,
    score: Score,
    history: Vec<Score>,
    status: Status,
    target: Tile,
    rng: R,
}

impl Session<StdRng> {
    /// Standard-start session with a deterministic RNG.
    pub fn seeded(seed: u64) -> Self {
        Session::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Standard start: an empty board with two random tiles.
    pub fn new(mut rng: R) -> Self {
        let board = Board::standard(&mut rng);
        Session::with_board(board, rng)
    }

    /// Start from a caller-supplied board (see [`Board::from_rows`]).
    ///
    /// The board is taken as-is; a board that already holds the target
    /// tile is reported as won on the first changing move.
    pub fn with_board(board: Board, rng: R) -> Self {
        Session {
            board,
            score: 0,
            history: Vec::new(),
            status: Status::Playing,
            target: DEFAULT_TARGET,
            rng,
        }
    }

    /// Replace the winning tile value (2048 by default).
    pub fn with_target(mut self, target: Tile) -> Self {
        self.target = target;
        self
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn target(&self) -> Tile {
        self.target
    }

    /// Final scores of finished games, highest first.
    pub fn score_history(&self) -> &[Score] {
        &self.history
    }

    /// Current state as an unchanged report.
    pub fn report(&self) -> Report {
        self.report_with(false)
    }

    fn report_with(&self, changed: bool) -> Report {
        Report {
            status: self.status,
            changed,
            board: self.board,
            score: self.score,
        }
    }

    /// Apply one move and advance the state machine.
    ///
    /// Terminal sessions ignore moves. An unchanged move spawns nothing and
    /// only checks whether the game is lost. A changed move adds the merge
    /// score, spawns a tile, then checks for a win before a loss.
    pub fn apply_move(&mut self, dir: Move) -> Report {
        if self.status.is_terminal() {
            return self.report();
        }

        let res = self.board.shift(dir);
        if !res.changed {
            if !self.board.has_valid_moves() {
                self.finish(Status::Lost);
            }
            debug!("{:?}: no change, status {:?}", dir, self.status);
            return self.report();
        }

        self.score = self.score.saturating_add(res.score);
        // A changed move either slid a tile into a gap or merged two tiles,
        // so at least one cell is empty here.
        self.board = res.board.with_random_tile(&mut self.rng);
        debug!("{:?}: +{} (score {})", dir, res.score, self.score);

        if self.board.contains_value(self.target) {
            self.finish(Status::Won);
        } else if !self.board.has_valid_moves() {
            self.finish(Status::Lost);
        }
        self.report_with(true)
    }

    /// Handle one key press the way the terminal front-end does.
    ///
    /// While playing, `w`/`a`/`s`/`d` move and anything else is ignored.
    /// Once the game has ended, only `r` (restart) has an effect.
    pub fn handle_key(&mut self, key: char) -> Report {
        if self.status.is_terminal() {
            if key.eq_ignore_ascii_case(&'r') {
                self.restart();
                return self.report_with(true);
            }
            return self.report();
        }
        match Move::from_key(key) {
            Some(dir) => self.apply_move(dir),
            None => self.report(),
        }
    }

    /// Start a fresh standard game. Score history is kept.
    pub fn restart(&mut self) {
        self.board = Board::standard(&mut self.rng);
        self.score = 0;
        self.status = Status::Playing;
        info!("game restarted");
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        record_score(&mut self.history, self.score);
        info!(
            "game over: {:?} with score {} (highest tile {})",
            status,
            self.score,
            self.board.highest_tile()
        );
    }
}

/// Insert `score` keeping `history` sorted highest first. Equal scores keep
/// their arrival order.
fn record_score(history: &mut Vec<Score>, score: Score) {
    let idx = history.partition_point(|&s| s >= score);
    history.insert(idx, score);
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCKED: [[Tile; 4]; 4] = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];

    fn session_from(cells: [[Tile; 4]; 4]) -> Session {
        Session::with_board(Board::from_cells(cells), StdRng::seed_from_u64(0))
    }

    #[test]
    fn it_record_score() {
        let mut h = Vec::new();
        for s in [10, 40, 20, 40, 0] {
            record_score(&mut h, s);
        }
        assert_eq!(h, vec![40, 40, 20, 10, 0]);
    }

    #[test]
    fn merge_adds_score_and_spawns() {
        let mut s = session_from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let r = s.apply_move(Move::Left);
        assert!(r.changed);
        assert_eq!(r.status, Status::Playing);
        assert_eq!(r.score, 4);
        assert_eq!(r.board.get(0, 0), 4);
        // merged tile plus one spawned tile
        assert_eq!(r.board.count_empty(), 14);
    }

    #[test]
    fn unchanged_move_is_a_no_op() {
        let start = [[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]];
        let mut s = session_from(start);
        let r = s.apply_move(Move::Left);
        assert!(!r.changed);
        assert_eq!(r.status, Status::Playing);
        assert_eq!(r.board, Board::from_cells(start));
        assert_eq!(r.score, 0);
        assert!(s.score_history().is_empty());
    }

    #[test]
    fn locked_board_loses_on_any_move() {
        for dir in Move::ALL {
            let mut s = session_from(LOCKED);
            let r = s.apply_move(dir);
            assert!(!r.changed);
            assert_eq!(r.status, Status::Lost);
            assert_eq!(s.score_history(), &[0]);
        }
    }

    #[test]
    fn reaching_target_wins() {
        let mut s = session_from([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let r = s.apply_move(Move::Left);
        assert_eq!(r.status, Status::Won);
        assert_eq!(r.score, 2048);
        assert_eq!(s.score_history(), &[2048]);
    }

    #[test]
    fn won_session_only_accepts_restart() {
        let mut s = session_from([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let won = s.apply_move(Move::Left);
        assert_eq!(won.status, Status::Won);

        for dir in Move::ALL {
            let r = s.apply_move(dir);
            assert!(!r.changed);
            assert_eq!(r.status, Status::Won);
            assert_eq!(r.board, won.board);
            assert_eq!(r.score, 2048);
        }

        let r = s.handle_key('a');
        assert!(!r.changed);
        assert_eq!(r.board, won.board);
        assert_eq!(s.score_history(), &[2048]);

        let r = s.handle_key('r');
        assert!(r.changed);
        assert_eq!(r.status, Status::Playing);
        assert_eq!(r.score, 0);
        assert_eq!(r.board.count_empty(), 14);
        assert_eq!(s.score_history(), &[2048]);
    }

    #[test]
    fn huge_custom_board_saturates_score() {
        let board = Board::from_rows(&[[i64::MAX; 4], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut s = Session::with_board(board, StdRng::seed_from_u64(0));
        let r = s.apply_move(Move::Left);
        assert!(r.changed);
        assert_eq!(r.status, Status::Playing);
        assert_eq!(r.score, Score::MAX);
        assert_eq!(r.board.get(0, 0), Tile::MAX - 1);

        // The score stays pinned once saturated.
        for dir in Move::ALL {
            s.apply_move(dir);
        }
        assert_eq!(s.score(), Score::MAX);
    }

    #[test]
    fn custom_target() {
        let mut s = session_from([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]).with_target(8);
        assert_eq!(s.apply_move(Move::Right).status, Status::Won);
    }

    #[test]
    fn terminal_session_ignores_moves() {
        let mut s = session_from(LOCKED);
        s.apply_move(Move::Up);
        let r = s.apply_move(Move::Down);
        assert_eq!(r.status, Status::Lost);
        assert!(!r.changed);
        assert_eq!(s.score_history().len(), 1);
    }

    #[test]
    fn keys_drive_the_session() {
        let mut s = session_from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = s.board();
        assert!(!s.handle_key('x').changed);
        assert_eq!(s.board(), before);
        assert!(s.handle_key('A').changed);
        assert_eq!(s.score(), 4);
    }

    #[test]
    fn only_restart_key_works_after_game_over() {
        let mut s = session_from(LOCKED);
        s.handle_key('w');
        assert_eq!(s.status(), Status::Lost);
        assert!(!s.handle_key('a').changed);
        let r = s.handle_key('r');
        assert!(r.changed);
        assert_eq!(r.status, Status::Playing);
        assert_eq!(r.score, 0);
        assert_eq!(r.board.count_empty(), 14);
        assert_eq!(s.score_history(), &[0]);
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let moves = [Move::Left, Move::Up, Move::Right, Move::Down];
        let mut a = Session::seeded(2024);
        let mut b = Session::seeded(2024);
        for i in 0..40 {
            let dir = moves[i % moves.len()];
            assert_eq!(a.apply_move(dir), b.apply_move(dir));
        }
    }
}
