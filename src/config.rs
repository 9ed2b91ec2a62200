use std::io::{self, Read};
use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};

use crate::engine::{Board, BoardError, Tile};
use crate::session::Session;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid start board: {0}")]
    Board(#[from] BoardError),
}

/// Game settings, usually read from a TOML file.
///
/// ```toml
/// target = 2048
/// seed = 7
/// start_board = [
///     [2, 4, 8, 16],
///     [32, 64, 128, 256],
///     [512, 1024, 1024, 0],
///     [0, 0, 0, 0],
/// ]
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct GameConfig {
    /// Tile value that wins the game.
    #[serde(default = "defaults::target")]
    pub target: Tile,

    /// Seed for tile spawns. Fresh entropy when omitted.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Custom first board. Restarts always use the standard opening.
    #[serde(default)]
    pub start_board: Option<Vec<Vec<toml::Value>>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target: defaults::target(),
            seed: None,
            start_board: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        // Surface a bad board at load time rather than at session start.
        cfg.start_board()?;
        Ok(cfg)
    }

    /// The validated custom board, if one is configured.
    pub fn start_board(&self) -> Result<Option<Board>, ConfigError> {
        let Some(rows) = &self.start_board else {
            return Ok(None);
        };
        let mut parsed = Vec::with_capacity(rows.len());
        for (r, row) in rows.iter().enumerate() {
            let cells = row
                .iter()
                .enumerate()
                .map(|(c, v)| {
                    v.as_integer()
                        .ok_or(BoardError::NonInteger { row: r, col: c })
                })
                .collect::<Result<Vec<i64>, _>>()?;
            parsed.push(cells);
        }
        Ok(Some(Board::from_rows(&parsed)?))
    }

    /// Build a session from these settings.
    pub fn session(&self) -> Result<Session, ConfigError> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = match self.start_board()? {
            Some(board) => Session::with_board(board, rng),
            None => Session::new(rng),
        };
        Ok(session.with_target(self.target))
    }
}

mod defaults {
    use crate::engine::Tile;

    pub fn target() -> Tile { crate::session::DEFAULT_TARGET }
}
