use crate::connectivity::{PathResult, find_path};
use crate::grid::{Coord, Grid, rotate_tile};
use crate::solution::{SolutionTile, WinCondition, is_solved};
use crate::tile::Tile;

/// A generated level: the live grid plus the route and orientations it was
/// built from.
///
/// The three parts are produced together by [`generate`](crate::generate)
/// and replaced together; only tile rotations change in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelState {
    pub grid: Grid,
    /// The planted route, start to finish inclusive.
    pub solution_path: Vec<Coord>,
    /// Solved orientation of every interior cell on the planted route.
    pub solution_tiles: Vec<SolutionTile>,
}

impl LevelState {
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Turns one tile a quarter clockwise; see [`rotate_tile`].
    pub fn rotate_tile(&mut self, row: usize, col: usize) -> Tile {
        rotate_tile(&mut self.grid, row, col)
    }

    pub fn check(&self) -> PathResult {
        find_path(&self.grid)
    }

    pub fn is_won(&self, condition: WinCondition) -> bool {
        match condition {
            WinCondition::Connected => self.check().connected,
            WinCondition::MatchesSolution => is_solved(&self.grid, &self.solution_tiles),
        }
    }

    /// Returns a copy of the grid with every planted tile at its solved
    /// rotation.
    pub fn solved_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        for s in &self.solution_tiles {
            grid.set(s.coord, s.tile());
        }
        grid
    }

    /// Puts every planted tile back to its solved rotation.
    pub fn restore_solution(&mut self) {
        self.grid = self.solved_grid();
    }
}
