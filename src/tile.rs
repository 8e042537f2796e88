use serde::{Deserialize, Deserializer, Serialize};

/// One of the four edges of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, clockwise from `Up`. This is also the neighbor order
    /// used by the path search.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Returns the `(row, col)` offset of a single step in this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    const fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Right => 0b0010,
            Direction::Down => 0b0100,
            Direction::Left => 0b1000,
        }
    }
}

/// The set of edges a tile opens toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Connections(u8);

impl Connections {
    pub const EMPTY: Connections = Connections(0);

    pub const fn from_dirs(a: Direction, b: Direction) -> Self {
        Connections(a.bit() | b.bit())
    }

    pub const fn single(dir: Direction) -> Self {
        Connections(dir.bit())
    }

    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    /// Iterates the contained directions in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl FromIterator<Direction> for Connections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Connections::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// Pipe segment shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    #[default]
    Empty,
    Start,
    Finish,
    Straight,
    Corner,
}

/// Corner connection table, indexed by rotation.
const CORNER_TABLE: [Connections; 4] = [
    Connections::from_dirs(Direction::Down, Direction::Right),
    Connections::from_dirs(Direction::Up, Direction::Right),
    Connections::from_dirs(Direction::Up, Direction::Left),
    Connections::from_dirs(Direction::Down, Direction::Left),
];

/// Returns the corner rotation whose connections are exactly `{a, b}`.
///
/// Returns `None` when `a` and `b` lie on the same axis.
pub fn corner_rotation_for(a: Direction, b: Direction) -> Option<u8> {
    let wanted = Connections::from_dirs(a, b);
    CORNER_TABLE
        .iter()
        .position(|&c| c == wanted)
        .map(|r| r as u8)
}

/// A grid cell: a pipe shape plus a quarter-turn count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Clockwise quarter turns, always in `0..=3`.
    #[serde(deserialize_with = "quarter_turns")]
    pub rotation: u8,
}

/// Reads a rotation and reduces it into `0..=3`.
fn quarter_turns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    u8::deserialize(deserializer).map(|r| r % 4)
}

impl Tile {
    pub const EMPTY: Tile = Tile::new(TileKind::Empty, 0);
    pub const START: Tile = Tile::new(TileKind::Start, 0);
    pub const FINISH: Tile = Tile::new(TileKind::Finish, 0);

    pub const fn new(kind: TileKind, rotation: u8) -> Self {
        Self {
            kind,
            rotation: rotation % 4,
        }
    }

    /// Start and finish are fixed in place.
    pub const fn is_rotatable(self) -> bool {
        !matches!(self.kind, TileKind::Start | TileKind::Finish)
    }

    /// Returns this tile turned one quarter clockwise. Fixed tiles are
    /// returned unchanged.
    pub const fn rotated(self) -> Self {
        if self.is_rotatable() {
            Tile::new(self.kind, self.rotation % 4 + 1)
        } else {
            self
        }
    }

    pub fn connections(self) -> Connections {
        connections(self)
    }

    /// Box-drawing glyph for text rendering.
    pub fn glyph(self) -> char {
        match self.kind {
            TileKind::Empty => ' ',
            TileKind::Start => 'S',
            TileKind::Finish => 'F',
            TileKind::Straight if self.rotation % 2 == 0 => '─',
            TileKind::Straight => '│',
            TileKind::Corner => match self.rotation % 4 {
                0 => '┌',
                1 => '└',
                2 => '┘',
                _ => '┐',
            },
        }
    }
}

/// Maps a tile to the edges it currently opens toward.
///
/// Start opens toward both interior neighbors (right and below) and finish
/// receives from both (left and above), so any right/down path can attach
/// to them. Neither depends on rotation.
pub fn connections(tile: Tile) -> Connections {
    match tile.kind {
        TileKind::Empty => Connections::EMPTY,
        TileKind::Start => Connections::from_dirs(Direction::Right, Direction::Down),
        TileKind::Finish => Connections::from_dirs(Direction::Left, Direction::Up),
        TileKind::Straight if tile.rotation % 2 == 0 => {
            Connections::from_dirs(Direction::Left, Direction::Right)
        }
        TileKind::Straight => Connections::from_dirs(Direction::Up, Direction::Down),
        TileKind::Corner => CORNER_TABLE[(tile.rotation % 4) as usize],
    }
}
