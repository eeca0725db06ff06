//! Door set generation for freshly created rooms.

use crate::random::RandomSource;
use crate::types::{Direction, DoorSet};

/// Doors for a room entered by travelling `from_direction`.
///
/// The return door is always present, every other wall gets a door with
/// `door_probability`, and a lone return door is topped up with one more so
/// the avatar never arrives in a dead end.
pub(super) fn generate_doors(
    from_direction: Direction,
    door_probability: f64,
    random: &mut dyn RandomSource,
) -> DoorSet {
    let return_door = from_direction.opposite();
    let mut doors = DoorSet::single(return_door);

    let others: Vec<Direction> =
        Direction::ALL.into_iter().filter(|direction| *direction != return_door).collect();
    for direction in &others {
        if random.chance(door_probability) {
            doors.insert(*direction);
        }
    }

    if doors.len() < 2 {
        doors.insert(others[random.index(others.len())]);
    }

    doors
}
