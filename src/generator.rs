use rand::Rng;
use tracing::debug;

use crate::grid::{Coord, Grid};
use crate::level::LevelState;
use crate::solution::SolutionTile;
use crate::tile::{Direction, Tile, TileKind, corner_rotation_for};

/// How the planted route from start to finish is chosen.
///
/// Every strategy produces a route that only moves right or down, so start
/// is always left toward the right or below and finish is always entered
/// from the left or above.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathStrategy {
    /// At each step move right or down with equal probability, forced right
    /// on the last row and down on the last column.
    #[default]
    RandomWalk,
    /// Visit each waypoint in order, moving right first and then down.
    ///
    /// Waypoints are clamped into the grid. A waypoint above or left of the
    /// current position is skipped. The route always ends at the finish.
    FixedWaypoints(Vec<Coord>),
}

impl PathStrategy {
    /// A zig-zag through the middle of a `size × size` grid.
    pub fn staircase(size: usize) -> Self {
        let last = size.saturating_sub(1);
        let mid = size / 2;
        PathStrategy::FixedWaypoints(vec![
            Coord::new(0, mid),
            Coord::new(mid, mid),
            Coord::new(mid, last),
        ])
    }
}

/// Parameters for level generation.
#[derive(Debug, Clone, Default)]
pub struct GeneratorParams {
    /// Route strategy for the planted solution.
    pub strategy: PathStrategy,
    /// Fill cells off the route with random straights and corners instead
    /// of leaving them empty.
    ///
    /// Decoys may happen to form a second route; under
    /// [`WinCondition::Connected`](crate::WinCondition::Connected) that
    /// route also wins.
    pub fill_decoys: bool,
}

/// Generates a level of side `size` with a planted, scrambled route.
///
/// The returned level records the route and the solved orientation of each
/// interior route cell; the live grid shows those cells at random
/// rotations. The output is deterministic given the same RNG state and
/// parameters.
///
/// # Panics
/// Panics if `size == 0`.
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R, params: &GeneratorParams) -> LevelState {
    assert!(size >= 1, "size must be at least 1");

    let mut grid = if params.fill_decoys {
        decoy_grid(size, rng)
    } else {
        Grid::new(size)
    };

    let (path, moves) = match &params.strategy {
        PathStrategy::RandomWalk => random_walk(size, rng),
        PathStrategy::FixedWaypoints(waypoints) => through_waypoints(size, waypoints),
    };

    // On a 1x1 grid both endpoints share a cell; start wins.
    grid.set(grid.finish(), Tile::FINISH);
    grid.set(grid.start(), Tile::START);

    // Interior vertex i is entered by moves[i - 1] and left by moves[i].
    let solution_tiles: Vec<SolutionTile> = (1..path.len().saturating_sub(1))
        .map(|i| {
            let tile = solved_tile(moves[i - 1], moves[i]);
            SolutionTile {
                coord: path[i],
                kind: tile.kind,
                rotation: tile.rotation,
            }
        })
        .collect();

    for s in &solution_tiles {
        grid.set(s.coord, Tile::new(s.kind, rng.random_range(0..4)));
    }

    debug!(
        size,
        route_len = path.len(),
        corners = solution_tiles
            .iter()
            .filter(|s| s.kind == TileKind::Corner)
            .count(),
        decoys = params.fill_decoys,
        "generated level"
    );

    LevelState {
        grid,
        solution_path: path,
        solution_tiles,
    }
}

/// Returns the solved tile for a route cell entered moving `into` and left
/// moving `out`: it must open back toward the previous cell and forward
/// toward the next one.
fn solved_tile(into: Direction, out: Direction) -> Tile {
    match corner_rotation_for(into.opposite(), out) {
        Some(rotation) => Tile::new(TileKind::Corner, rotation),
        None if into.is_horizontal() => Tile::new(TileKind::Straight, 0),
        None => Tile::new(TileKind::Straight, 1),
    }
}

fn decoy_grid<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(size);
    for row in 0..size {
        for col in 0..size {
            let kind = if rng.random_bool(0.5) {
                TileKind::Straight
            } else {
                TileKind::Corner
            };
            grid.set(Coord::new(row, col), Tile::new(kind, rng.random_range(0..4)));
        }
    }
    grid
}

/// Returns the route cells and the move taken out of each cell but the last.
fn random_walk<R: Rng + ?Sized>(size: usize, rng: &mut R) -> (Vec<Coord>, Vec<Direction>) {
    let last = size - 1;
    let mut at = Coord::new(0, 0);
    let mut path = Vec::with_capacity(2 * size - 1);
    let mut moves = Vec::with_capacity(2 * size - 2);
    path.push(at);

    while at.row < last || at.col < last {
        let dir = if at.row == last {
            Direction::Right
        } else if at.col == last {
            Direction::Down
        } else if rng.random_bool(0.5) {
            Direction::Right
        } else {
            Direction::Down
        };
        advance(&mut at, dir);
        moves.push(dir);
        path.push(at);
    }

    (path, moves)
}

fn through_waypoints(size: usize, waypoints: &[Coord]) -> (Vec<Coord>, Vec<Direction>) {
    let last = size - 1;
    let mut at = Coord::new(0, 0);
    let mut path = vec![at];
    let mut moves = Vec::new();

    let targets = waypoints
        .iter()
        .map(|w| Coord::new(w.row.min(last), w.col.min(last)))
        .chain(std::iter::once(Coord::new(last, last)));

    for target in targets {
        if target.row < at.row || target.col < at.col {
            continue;
        }
        while at.col < target.col {
            advance(&mut at, Direction::Right);
            moves.push(Direction::Right);
            path.push(at);
        }
        while at.row < target.row {
            advance(&mut at, Direction::Down);
            moves.push(Direction::Down);
            path.push(at);
        }
    }

    (path, moves)
}

#[inline]
fn advance(at: &mut Coord, dir: Direction) {
    match dir {
        Direction::Right => at.col += 1,
        Direction::Down => at.row += 1,
        Direction::Up => at.row -= 1,
        Direction::Left => at.col -= 1,
    }
}

/// An endless stream of levels of one size.
///
/// Each call to `next()` generates a fresh level from the same RNG, as
/// needed for "next level" and "randomize" requests.
///
/// # Example
///
/// ```
/// use pipe_connect::{GeneratorParams, Levels};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let rng = ChaCha20Rng::seed_from_u64(0);
/// let levels = Levels::new(5, rng, GeneratorParams::default());
///
/// for level in levels.take(3) {
///     assert_eq!(level.size(), 5);
/// }
/// ```
pub struct Levels<R> {
    size: usize,
    rng: R,
    params: GeneratorParams,
}

impl<R: Rng> Levels<R> {
    /// # Panics
    /// Panics if `size == 0`.
    pub fn new(size: usize, rng: R, params: GeneratorParams) -> Self {
        assert!(size >= 1, "size must be at least 1");
        Self { size, rng, params }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Changes the size of subsequent levels.
    ///
    /// # Panics
    /// Panics if `size == 0`.
    pub fn set_size(&mut self, size: usize) {
        assert!(size >= 1, "size must be at least 1");
        self.size = size;
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Generates the next level.
    pub fn generate_next(&mut self) -> LevelState {
        generate(self.size, &mut self.rng, &self.params)
    }
}

impl<R: Rng> Iterator for Levels<R> {
    type Item = LevelState;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate_next())
    }
}
