//! Breadth-first search for a connected pipe route from start to finish.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::grid::{Coord, Grid};
use crate::tile::{Direction, connections};

/// Outcome of a connectivity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    pub connected: bool,
    /// Cells from start to finish, inclusive. Empty when not connected.
    pub path: Vec<Coord>,
}

impl PathResult {
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            path: Vec::new(),
        }
    }
}

/// Returns the neighbor reached by leaving `from` in `dir`, if both tiles
/// open toward each other across that edge.
pub fn is_edge_open(grid: &Grid, from: Coord, dir: Direction) -> Option<Coord> {
    let to = from.step(dir, grid.size())?;
    let open = connections(grid.get(from)).contains(dir)
        && connections(grid.get(to)).contains(dir.opposite());
    open.then_some(to)
}

/// Searches for a chain of mutually connected tiles from the start cell to
/// the finish cell.
///
/// Returns the first route discovered; BFS makes it a shortest one, and
/// among equal-length routes the choice follows `Direction::ALL` order.
/// The grid is only read.
pub fn find_path(grid: &Grid) -> PathResult {
    let size = grid.size();
    if size == 0 {
        return PathResult::disconnected();
    }
    let start = grid.start();
    let finish = grid.finish();
    let index = |c: Coord| c.row * size + c.col;

    // Predecessor of each discovered cell; the start points at itself.
    let mut parent: Vec<Option<Coord>> = vec![None; size * size];
    let mut queue = VecDeque::with_capacity(size * size);
    parent[index(start)] = Some(start);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == finish {
            let path = reconstruct(&parent, start, finish, index);
            trace!(len = path.len(), "route found");
            return PathResult {
                connected: true,
                path,
            };
        }
        for dir in Direction::ALL {
            if let Some(next) = is_edge_open(grid, cell, dir) {
                let slot = &mut parent[index(next)];
                if slot.is_none() {
                    *slot = Some(cell);
                    queue.push_back(next);
                }
            }
        }
    }

    trace!("no route");
    PathResult::disconnected()
}

fn reconstruct(
    parent: &[Option<Coord>],
    start: Coord,
    finish: Coord,
    index: impl Fn(Coord) -> usize,
) -> Vec<Coord> {
    let mut path = vec![finish];
    let mut cell = finish;
    while cell != start {
        match parent[index(cell)] {
            Some(prev) => {
                path.push(prev);
                cell = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Tile, TileKind};

    fn straight(rotation: u8) -> Tile {
        Tile::new(TileKind::Straight, rotation)
    }

    fn corner(rotation: u8) -> Tile {
        Tile::new(TileKind::Corner, rotation)
    }

    /// S ─ ┐
    /// . . │
    /// . . F
    fn top_route() -> Grid {
        let mut grid = Grid::new(3);
        grid.set(Coord::new(0, 0), Tile::START);
        grid.set(Coord::new(0, 1), straight(0));
        grid.set(Coord::new(0, 2), corner(3));
        grid.set(Coord::new(1, 2), straight(1));
        grid.set(Coord::new(2, 2), Tile::FINISH);
        grid
    }

    #[test]
    fn finds_route_along_the_top() {
        let result = find_path(&top_route());
        assert!(result.connected);
        assert_eq!(
            result.path,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(1, 2),
                Coord::new(2, 2),
            ]
        );
    }

    #[test]
    fn one_wrong_tile_breaks_the_route() {
        let mut grid = top_route();
        grid.set(Coord::new(1, 2), straight(0));
        assert_eq!(find_path(&grid), PathResult::disconnected());
    }

    #[test]
    fn one_sided_openings_are_not_edges() {
        let mut grid = top_route();
        // (0,1) still opens right, but the corner now faces away from it.
        grid.set(Coord::new(0, 2), corner(0));
        assert!(is_edge_open(&grid, Coord::new(0, 0), Direction::Right).is_some());
        assert!(is_edge_open(&grid, Coord::new(0, 1), Direction::Right).is_none());
        assert!(!find_path(&grid).connected);
    }

    #[test]
    fn every_path_step_is_a_mutual_connection() {
        let result = find_path(&top_route());
        for pair in result.path.windows(2) {
            let dir = pair[0].direction_to(pair[1]).unwrap();
            assert_eq!(is_edge_open(&top_route(), pair[0], dir), Some(pair[1]));
        }
    }

    #[test]
    fn cycles_do_not_loop_forever() {
        // A closed ring of corners in the top-left plus an unreachable finish.
        let mut grid = Grid::new(4);
        grid.set(Coord::new(0, 0), Tile::START);
        grid.set(Coord::new(0, 1), corner(3));
        grid.set(Coord::new(1, 0), corner(1));
        grid.set(Coord::new(1, 1), corner(2));
        grid.set(Coord::new(3, 3), Tile::FINISH);
        assert!(!find_path(&grid).connected);
    }

    #[test]
    fn repeated_queries_agree() {
        let grid = top_route();
        assert_eq!(find_path(&grid), find_path(&grid));
    }

    #[test]
    fn single_cell_grid_is_trivially_connected() {
        let mut grid = Grid::new(1);
        grid.set(Coord::new(0, 0), Tile::START);
        let result = find_path(&grid);
        assert!(result.connected);
        assert_eq!(result.path, vec![Coord::new(0, 0)]);
    }

    #[test]
    fn two_by_two_needs_the_interior_corner() {
        let mut grid = Grid::new(2);
        grid.set(Coord::new(0, 0), Tile::START);
        grid.set(Coord::new(1, 1), Tile::FINISH);
        // Start and finish are diagonal; nothing connects them directly.
        assert!(!find_path(&grid).connected);

        for rotation in 0..4 {
            grid.set(Coord::new(0, 1), corner(rotation));
            assert_eq!(find_path(&grid).connected, rotation == 3, "rotation {}", rotation);
        }
    }
}
