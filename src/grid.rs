use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::{Direction, Tile};

/// A cell position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighbor one step in `dir`, or `None` if it falls outside
    /// a `size × size` grid.
    pub fn step(self, dir: Direction, size: usize) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Coord { row, col })
    }

    /// Returns the direction leading from `self` to an orthogonally adjacent
    /// `other`.
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        let dr = other.row as isize - self.row as isize;
        let dc = other.col as isize - self.col as isize;
        Direction::ALL.into_iter().find(|d| d.delta() == (dr, dc))
    }
}

/// A square board of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Creates a `size × size` grid of empty tiles.
    pub fn new(size: usize) -> Self {
        Self::filled(size, Tile::EMPTY)
    }

    pub fn filled(size: usize, tile: Tile) -> Self {
        Self {
            size,
            cells: vec![tile; size * size],
        }
    }

    /// Returns the side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Start cell, always the top-left corner.
    pub fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    /// Finish cell, always the bottom-right corner.
    pub fn finish(&self) -> Coord {
        let last = self.size.saturating_sub(1);
        Coord::new(last, last)
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.size && at.col < self.size
    }

    /// Returns the tile at `at`.
    ///
    /// # Panics
    /// Panics in debug builds if `at` lies outside the grid. Callers derive
    /// coordinates from the grid itself, so release builds only index.
    pub fn get(&self, at: Coord) -> Tile {
        debug_assert!(self.contains(at), "coordinate out of bounds");
        self.cells[self.index(at)]
    }

    /// # Panics
    /// Panics in debug builds if `at` lies outside the grid.
    pub fn set(&mut self, at: Coord, tile: Tile) {
        debug_assert!(self.contains(at), "coordinate out of bounds");
        let idx = self.index(at);
        self.cells[idx] = tile;
    }

    /// Returns the tiles as a flat slice in row-major order.
    ///
    /// The tile at `(row, col)` is at index `row * size + col`.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Iterates the rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.size.max(1))
    }

    #[inline]
    fn index(&self, at: Coord) -> usize {
        at.row * self.size + at.col
    }
}

/// Turns the tile at `(row, col)` one quarter clockwise and returns it.
///
/// Start and finish never rotate; for those the tile is returned unchanged.
///
/// # Panics
/// Panics in debug builds if `(row, col)` lies outside the grid.
pub fn rotate_tile(grid: &mut Grid, row: usize, col: usize) -> Tile {
    let at = Coord::new(row, col);
    let tile = grid.get(at).rotated();
    grid.set(at, tile);
    tile
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for tile in row {
                write!(f, "{}", tile.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKind;

    #[test]
    fn step_stays_inside_the_grid() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.step(Direction::Up, 3), None);
        assert_eq!(origin.step(Direction::Left, 3), None);
        assert_eq!(origin.step(Direction::Right, 3), Some(Coord::new(0, 1)));
        assert_eq!(origin.step(Direction::Down, 3), Some(Coord::new(1, 0)));

        let corner = Coord::new(2, 2);
        assert_eq!(corner.step(Direction::Down, 3), None);
        assert_eq!(corner.step(Direction::Right, 3), None);
    }

    #[test]
    fn direction_to_adjacent_only() {
        let c = Coord::new(1, 1);
        assert_eq!(c.direction_to(Coord::new(0, 1)), Some(Direction::Up));
        assert_eq!(c.direction_to(Coord::new(1, 2)), Some(Direction::Right));
        assert_eq!(c.direction_to(Coord::new(2, 2)), None);
        assert_eq!(c.direction_to(c), None);
    }

    #[test]
    fn rotate_skips_fixed_tiles() {
        let mut grid = Grid::new(3);
        grid.set(Coord::new(0, 0), Tile::START);
        grid.set(Coord::new(1, 1), Tile::new(TileKind::Corner, 3));

        let start = rotate_tile(&mut grid, 0, 0);
        assert_eq!(start, Tile::START);
        assert_eq!(grid.get(Coord::new(0, 0)).rotation, 0);

        let corner = rotate_tile(&mut grid, 1, 1);
        assert_eq!(corner.rotation, 0);
        assert_eq!(grid.get(Coord::new(1, 1)), corner);
    }

    #[test]
    fn display_draws_one_line_per_row() {
        let mut grid = Grid::new(2);
        grid.set(Coord::new(0, 0), Tile::START);
        grid.set(Coord::new(0, 1), Tile::new(TileKind::Corner, 3));
        grid.set(Coord::new(1, 1), Tile::FINISH);
        assert_eq!(grid.to_string(), "S┐\n F\n");
    }
}
