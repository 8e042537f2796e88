use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Grid};
use crate::tile::{Tile, TileKind};

/// The orientation a path cell must show to count as solved, recorded at
/// generation time before scrambling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionTile {
    pub coord: Coord,
    pub kind: TileKind,
    pub rotation: u8,
}

impl SolutionTile {
    pub fn tile(&self) -> Tile {
        Tile::new(self.kind, self.rotation)
    }
}

/// How a level decides it has been won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinCondition {
    /// Any connected start-to-finish route wins.
    #[default]
    Connected,
    /// Only the planted route, at its recorded rotations, wins.
    MatchesSolution,
}

/// Returns true when every recorded solution cell shows exactly its
/// recorded shape and rotation.
///
/// Straights are compared on the exact rotation, not on orientation: a
/// straight turned by 180° has the same connections but does not match.
pub fn is_solved(grid: &Grid, solution: &[SolutionTile]) -> bool {
    solution.iter().all(|s| {
        let live = grid.get(s.coord);
        live.kind == s.kind && live.rotation % 4 == s.rotation % 4
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planted() -> (Grid, Vec<SolutionTile>) {
        let mut grid = Grid::new(2);
        grid.set(Coord::new(0, 0), Tile::START);
        grid.set(Coord::new(0, 1), Tile::new(TileKind::Corner, 3));
        grid.set(Coord::new(1, 1), Tile::FINISH);
        let solution = vec![SolutionTile {
            coord: Coord::new(0, 1),
            kind: TileKind::Corner,
            rotation: 3,
        }];
        (grid, solution)
    }

    #[test]
    fn matches_recorded_rotation() {
        let (grid, solution) = planted();
        assert!(is_solved(&grid, &solution));
    }

    #[test]
    fn any_mismatch_fails() {
        let (mut grid, solution) = planted();
        grid.set(Coord::new(0, 1), Tile::new(TileKind::Corner, 0));
        assert!(!is_solved(&grid, &solution));

        grid.set(Coord::new(0, 1), Tile::new(TileKind::Straight, 3));
        assert!(!is_solved(&grid, &solution));
    }

    #[test]
    fn straight_half_turn_is_not_the_planted_state() {
        let mut grid = Grid::new(3);
        let at = Coord::new(0, 1);
        grid.set(at, Tile::new(TileKind::Straight, 2));
        let solution = [SolutionTile {
            coord: at,
            kind: TileKind::Straight,
            rotation: 0,
        }];
        assert!(!is_solved(&grid, &solution));
    }

    #[test]
    fn unreduced_rotation_compares_as_quarter_turns() {
        let (mut grid, solution) = planted();
        let at = Coord::new(0, 1);
        grid.set(
            at,
            Tile {
                kind: TileKind::Corner,
                rotation: 7,
            },
        );
        assert_eq!(grid.get(at).connections(), solution[0].tile().connections());
        assert!(is_solved(&grid, &solution));
    }

    #[test]
    fn empty_solution_is_vacuously_solved() {
        assert!(is_solved(&Grid::new(1), &[]));
    }
}
