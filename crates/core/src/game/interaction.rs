//! Item pickup within the current room.

use std::f32::consts::TAU;

use log::debug;

use super::*;
use crate::content::item_info;

/// World position of item `index` out of `count`, laid out on a ring around
/// the room centre.
pub fn item_position(center: WorldPos, index: usize, count: usize, radius: f32) -> WorldPos {
    let angle = index as f32 / count.max(1) as f32 * TAU;
    WorldPos::new(center.x + angle.cos() * radius, center.z + angle.sin() * radius)
}

impl Game {
    /// Picks up the closest item within reach. Ties go to the later item.
    pub fn pick_up(&mut self) -> Result<Item, GameError> {
        self.ensure_running()?;
        let room = self.current_room().ok_or(GameError::NoItemInReach)?;
        let geometry = &self.config.geometry;
        let center = room.position.world_center(geometry.room_size);
        let count = room.items.len();

        let mut nearest: Option<(f32, ItemId)> = None;
        for (index, item) in room.items.iter().enumerate().rev() {
            let distance = item_position(center, index, count, geometry.item_ring_radius)
                .distance(self.avatar.pos);
            if distance < geometry.pickup_radius
                && nearest.is_none_or(|(best, _)| distance < best)
            {
                nearest = Some((distance, item.id));
            }
        }

        let (_, item_id) = nearest.ok_or(GameError::NoItemInReach)?;
        let room_id = room.id;
        let item = self.generator.take_item(room_id, item_id).ok_or(GameError::NoItemInReach)?;
        debug!("picked up {}", item_info(item.kind).name);
        self.events.push(GameEvent::ItemPickedUp { item });
        Ok(item)
    }
}
