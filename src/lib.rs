//! game-2048: a 2048 board engine + game session
//!
//! This crate provides:
//! - A `Board` type with pure transforms (`shift`, `compress`, `merge`, ...)
//!   and terminal-state queries (`has_valid_moves`, `contains_value`)
//! - A `Session` state machine (`session` module) that tracks score, win/loss
//!   status and a descending score history
//! - TOML game settings (`config` module)
//!
//! Quick start:
//! ```
//! use game_2048::engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::standard(&mut rng);
//! let res = b0.shift(Move::Left);
//! assert_eq!(res.changed, res.board != b0);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use game_2048::engine::Move;
//! use game_2048::session::{Session, Status};
//!
//! let mut session = Session::seeded(123);
//! let mut moves = 0u32;
//! while session.status() == Status::Playing && moves < 8 {
//!     session.apply_move(Move::ALL[moves as usize % 4]);
//!     moves += 1;
//! }
//! let _final_score = session.score();
//! ```
//!
pub mod config;
pub mod engine;
pub mod session;
