#![doc = include_str!("../README.md")]

mod connectivity;
mod error;
mod generator;
mod grid;
mod level;
mod session;
mod solution;
mod tile;
#[cfg(feature = "wasm")]
mod wasm;

pub use connectivity::{PathResult, find_path, is_edge_open};
pub use error::ConfigError;
pub use generator::{GeneratorParams, Levels, PathStrategy, generate};
pub use grid::{Coord, Grid, rotate_tile};
pub use level::LevelState;
pub use session::{Difficulty, MAX_GRID_SIZE, Session, validate_size};
pub use solution::{SolutionTile, WinCondition, is_solved};
pub use tile::{Connections, Direction, Tile, TileKind, connections, corner_rotation_for};
