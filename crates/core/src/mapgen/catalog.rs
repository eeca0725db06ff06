//! Grid-cell → room mapping; the single source of truth for "has this cell been generated".

use std::collections::BTreeMap;
use std::ops::Index;

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use super::model::Room;
use crate::types::{GridPosition, RoomId};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    rooms: SlotMap<RoomId, Room>,
    by_position: BTreeMap<GridPosition, RoomId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        self.by_position.contains_key(&position)
    }

    pub fn get(&self, position: GridPosition) -> Option<&Room> {
        self.by_position.get(&position).and_then(|id| self.rooms.get(*id))
    }

    pub fn id_at(&self, position: GridPosition) -> Option<RoomId> {
        self.by_position.get(&position).copied()
    }

    /// Lookup by id. Ids from before a `clear` never resolve again.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    /// Rooms in grid order.
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.by_position.values().filter_map(|id| self.rooms.get(*id))
    }

    pub(crate) fn insert(&mut self, room: Room) -> RoomId {
        debug_assert!(!self.contains(room.position), "cell {:?} generated twice", room.position);
        let position = room.position;
        let id = self.rooms.insert(room);
        self.rooms[id].id = id;
        self.by_position.insert(position, id);
        id
    }

    pub(crate) fn clear(&mut self) {
        self.rooms.clear();
        self.by_position.clear();
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.len() as u32).to_le_bytes());
        for room in self.iter() {
            room.canonical_bytes(&mut bytes);
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl Index<RoomId> for Catalog {
    type Output = Room;

    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id]
    }
}
