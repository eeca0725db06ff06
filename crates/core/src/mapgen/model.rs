//! Room records held by the Catalog.

use serde::{Deserialize, Serialize};

use crate::types::{DoorSet, GridPosition, HazardKind, Item, Level, NpcKind, RoomCategory, RoomId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub category: RoomCategory,
    pub position: GridPosition,
    pub doors: DoorSet,
    pub items: Vec<Item>,
    pub hazard: Option<HazardKind>,
    pub npc: Option<NpcKind>,
    pub visited: bool,
    /// Narrative hint only; never affects topology.
    pub is_loop: bool,
    pub level: Level,
}

impl Room {
    pub(crate) fn new(
        position: GridPosition,
        category: RoomCategory,
        doors: DoorSet,
        level: Level,
    ) -> Self {
        Self {
            id: RoomId::default(),
            category,
            position,
            doors,
            items: Vec::new(),
            hazard: None,
            npc: None,
            visited: false,
            is_loop: false,
            level,
        }
    }

    pub fn has_hazard(&self) -> bool {
        self.hazard.is_some()
    }

    pub fn has_npc(&self) -> bool {
        self.npc.is_some()
    }

    pub fn canonical_bytes(&self, bytes: &mut Vec<u8>) {
        bytes.extend(self.position.grid_x.to_le_bytes());
        bytes.extend(self.position.grid_z.to_le_bytes());
        bytes.push(self.category as u8);
        bytes.push(self.doors.bits());
        bytes.push(self.level as u8);
        bytes.push(u8::from(self.visited));
        bytes.push(u8::from(self.is_loop));
        bytes.push(self.hazard.map_or(0, |kind| kind as u8 + 1));
        bytes.push(self.npc.map_or(0, |kind| kind as u8 + 1));
        bytes.extend((self.items.len() as u32).to_le_bytes());
        for item in &self.items {
            bytes.extend(item.id.0.to_le_bytes());
            bytes.push(item.kind as u8);
        }
    }
}
