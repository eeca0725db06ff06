use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct RoomId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Integer address of one room in the infinite level grid.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridPosition {
    pub grid_x: i32,
    pub grid_z: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { grid_x: 0, grid_z: 0 };

    pub const fn new(grid_x: i32, grid_z: i32) -> Self {
        Self { grid_x, grid_z }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        Self { grid_x: self.grid_x + dx, grid_z: self.grid_z + dz }
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self.grid_x.abs_diff(other.grid_x) + self.grid_z.abs_diff(other.grid_z) == 1
    }

    /// Cardinal direction that leads from `self` to `other`, if they are adjacent.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::from_delta(other.grid_x - self.grid_x, other.grid_z - self.grid_z)
    }

    /// Quantizes a continuous world position to the cell whose centre is nearest.
    /// Halfway points round towards positive infinity.
    pub fn from_world(pos: WorldPos, room_size: f32) -> Self {
        Self {
            grid_x: (pos.x / room_size + 0.5).floor() as i32,
            grid_z: (pos.z / room_size + 0.5).floor() as i32,
        }
    }

    pub fn world_center(self, room_size: f32) -> WorldPos {
        WorldPos { x: self.grid_x as f32 * room_size, z: self.grid_z as f32 * room_size }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit `(dx, dz)` step. North is negative z.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn from_delta(dx: i32, dz: i32) -> Option<Self> {
        match (dx, dz) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

/// Set of walls that carry a door.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorSet(u8);

impl DoorSet {
    pub const ALL: DoorSet = DoorSet(0b1111);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn single(direction: Direction) -> Self {
        Self(direction.bit())
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Returns `true` when the door was not present before.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let added = !self.contains(direction);
        self.0 |= direction.bit();
        added
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |direction| self.contains(*direction))
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl FromIterator<Direction> for DoorSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut doors = DoorSet::empty();
        for direction in iter {
            doors.insert(direction);
        }
        doors
    }
}

/// Continuous position on the floor plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance(self, other: Self) -> f32 {
        ((self.x - other.x).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }
}

/// Macro-layer the Catalog currently holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Lobby,
    GridRooms,
}

impl Level {
    pub fn number(self) -> u16 {
        match self {
            Level::Lobby => 0,
            Level::GridRooms => 188,
        }
    }

    /// Level a portal room leads to.
    pub fn portal_target(self) -> Self {
        match self {
            Level::Lobby => Level::GridRooms,
            Level::GridRooms => Level::Lobby,
        }
    }

    pub fn suppresses_hazards(self) -> bool {
        self == Level::GridRooms
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    Ordinary,
    Hazardous,
    Hub,
    Secret,
    Exit,
    Portal,
    Grid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    AlmondWater,
    OilLamp,
    Battery,
    Key,
    Lighter,
    Newspaper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Smiler,
    SkinStealer,
    Shadow,
    Partygoer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Wanderer,
    Collector,
    Scholar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
}

/// Status flags read from the avatar each tick. They shape spawn odds, never topology.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarStatus {
    pub noise_level: f32,
    pub has_light: bool,
    pub sanity: f32,
}

impl Default for AvatarStatus {
    fn default() -> Self {
        Self { noise_level: 0.0, has_light: false, sanity: 100.0 }
    }
}

/// Avatar position and status. The external actor layer reports the desired
/// value each tick; `Game` keeps the bounded, wall-guarded result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: WorldPos,
    pub status: AvatarStatus,
}

impl Avatar {
    pub fn at(x: f32, z: f32) -> Self {
        Self { pos: WorldPos::new(x, z), status: AvatarStatus::default() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Exploring,
    Escaped,
}
