use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::info;

use crate::connectivity::PathResult;
use crate::error::ConfigError;
use crate::generator::{GeneratorParams, Levels};
use crate::level::LevelState;
use crate::solution::WinCondition;
use crate::tile::Tile;

/// Largest grid size accepted from configuration.
pub const MAX_GRID_SIZE: usize = 32;

/// Grid size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 7,
            Difficulty::Hard => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Checks a grid size supplied from outside the crate.
pub fn validate_size(size: usize) -> Result<usize, ConfigError> {
    if (1..=MAX_GRID_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ConfigError::InvalidSize {
            size,
            max: MAX_GRID_SIZE,
        })
    }
}

/// One player's game: the active level, the level counter and the level
/// clock.
///
/// Timestamps are milliseconds from a monotonic clock owned by the caller.
/// Starting a level resets the clock rather than starting a second one.
pub struct Session<R> {
    levels: Levels<R>,
    level: LevelState,
    level_number: u32,
    started_at_ms: u64,
    win_condition: WinCondition,
}

impl<R: Rng> Session<R> {
    pub fn new(difficulty: Difficulty, rng: R, params: GeneratorParams, now_ms: u64) -> Self {
        Self::start(difficulty.grid_size(), rng, params, now_ms)
    }

    /// Starts a session with a custom grid size.
    pub fn with_size(
        size: usize,
        rng: R,
        params: GeneratorParams,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        let size = validate_size(size)?;
        Ok(Self::start(size, rng, params, now_ms))
    }

    fn start(size: usize, rng: R, params: GeneratorParams, now_ms: u64) -> Self {
        let mut levels = Levels::new(size, rng, params);
        let level = levels.generate_next();
        info!(size, "new game");
        Self {
            levels,
            level,
            level_number: 1,
            started_at_ms: now_ms,
            win_condition: WinCondition::default(),
        }
    }

    pub fn with_win_condition(mut self, condition: WinCondition) -> Self {
        self.win_condition = condition;
        self
    }

    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    pub fn state(&self) -> &LevelState {
        &self.level
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn size(&self) -> usize {
        self.levels.size()
    }

    /// Restarts at level 1 with the given difficulty.
    pub fn new_game(&mut self, difficulty: Difficulty, now_ms: u64) {
        self.levels.set_size(difficulty.grid_size());
        self.level = self.levels.generate_next();
        self.level_number = 1;
        self.started_at_ms = now_ms;
        info!(%difficulty, size = self.size(), "new game");
    }

    /// Advances to a fresh level of the same size and restarts the clock.
    pub fn next_level(&mut self, now_ms: u64) {
        self.level = self.levels.generate_next();
        self.level_number += 1;
        self.started_at_ms = now_ms;
        info!(level = self.level_number, "next level");
    }

    /// Replaces the board with a fresh one; level and clock are kept.
    pub fn randomize(&mut self) {
        self.level = self.levels.generate_next();
    }

    /// Turns one tile; see [`LevelState::rotate_tile`].
    pub fn rotate(&mut self, row: usize, col: usize) -> Tile {
        self.level.rotate_tile(row, col)
    }

    /// Like [`Session::rotate`], for coordinates that come from outside the
    /// crate.
    pub fn try_rotate(&mut self, row: usize, col: usize) -> Result<Tile, ConfigError> {
        let size = self.size();
        if row >= size || col >= size {
            return Err(ConfigError::OutOfBounds { row, col, size });
        }
        Ok(self.rotate(row, col))
    }

    pub fn check(&self) -> PathResult {
        self.level.check()
    }

    pub fn is_won(&self) -> bool {
        self.level.is_won(self.win_condition)
    }

    /// Whole seconds since the current level started.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms) / 1000
    }
}
