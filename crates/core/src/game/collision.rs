//! Room boundary math: wall clamping, push-back, and entrance placement.
//! Rooms are axis-aligned squares centred on their grid cell.

use crate::config::GeometryConfig;
use crate::types::{Direction, DoorSet, GridPosition, WorldPos};

/// Clamps `pos` to the interior of the room at `room`, leaving a door-wide gap
/// open in every wall that has a door.
///
/// An axis is clamped when the body would overlap the wall and either the wall
/// is solid or the off-axis offset misses the door gap. Through a gap the body
/// may reach the far side of the neighbouring cell but never past it, so the
/// guarded position is always in `room` or in a cell that shares a door with it.
pub fn guard_walls(
    pos: WorldPos,
    room: GridPosition,
    doors: DoorSet,
    geometry: &GeometryConfig,
) -> WorldPos {
    let center = room.world_center(geometry.room_size);
    let gates_x = (doors.contains(Direction::West), doors.contains(Direction::East));
    let gates_z = (doors.contains(Direction::North), doors.contains(Direction::South));

    WorldPos::new(
        guard_axis(pos.x, center.x, pos.z - center.z, gates_x, geometry),
        guard_axis(pos.z, center.z, pos.x - center.x, gates_z, geometry),
    )
}

/// Guards one world coordinate against the walls at `center ± half_size`.
/// `across` is the local offset on the other axis, tested against the door
/// gap; `(negative, positive)` say which of the two walls has a door.
fn guard_axis(
    coord: f32,
    center: f32,
    across: f32,
    (negative, positive): (bool, bool),
    geometry: &GeometryConfig,
) -> f32 {
    let along = coord - center;
    let limit = geometry.half_size() - geometry.body_radius;
    if along.abs() <= limit {
        return coord;
    }
    let door = if along > 0.0 { positive } else { negative };
    if !door || across.abs() > geometry.door_width / 2.0 {
        return center + along.clamp(-limit, limit);
    }
    let reach = geometry.room_size - geometry.body_radius;
    if along.abs() <= reach {
        return coord;
    }
    center + along.clamp(-reach, reach)
}

/// Pulls the coordinate on `direction`'s axis back to `push_back_margin` inside
/// the wall the avatar tried to cross.
pub(super) fn push_back(
    pos: WorldPos,
    room: GridPosition,
    direction: Direction,
    geometry: &GeometryConfig,
) -> WorldPos {
    let center = room.world_center(geometry.room_size);
    let inside = geometry.half_size() - geometry.push_back_margin;
    let (dx, dz) = direction.offset();
    let mut pushed = pos;
    if dx != 0 {
        pushed.x = center.x + dx as f32 * inside;
    }
    if dz != 0 {
        pushed.z = center.z + dz as f32 * inside;
    }
    pushed
}

/// Clamps both axes to `push_back_margin` inside the room.
pub(super) fn contain(pos: WorldPos, room: GridPosition, geometry: &GeometryConfig) -> WorldPos {
    let center = room.world_center(geometry.room_size);
    let inside = geometry.half_size() - geometry.push_back_margin;
    WorldPos::new(
        pos.x.clamp(center.x - inside, center.x + inside),
        pos.z.clamp(center.z - inside, center.z + inside),
    )
}

/// Spot just past the threshold of the wall entered through when travelling
/// in `direction`, centred on the door.
pub(super) fn entrance_point(
    room: GridPosition,
    direction: Direction,
    geometry: &GeometryConfig,
) -> WorldPos {
    let center = room.world_center(geometry.room_size);
    let offset = geometry.half_size() - geometry.entrance_inset;
    let (dx, dz) = direction.offset();
    WorldPos::new(center.x - dx as f32 * offset, center.z - dz as f32 * offset)
}
