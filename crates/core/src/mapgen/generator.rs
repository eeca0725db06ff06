//! On-demand room creation. The generator is the only writer of the Catalog.

use log::{debug, info};

use super::catalog::Catalog;
use super::doors::generate_doors;
use super::model::Room;
use super::progression::{LevelProgress, decide_room_type};
use super::seed::{RandomStream, derive_stream_seed};
use super::spawns::{roll_hazard, roll_items, roll_npc, starting_items};
use crate::config::GenerationConfig;
use crate::random::{RandomSource, SeededRandom};
use crate::types::{
    Direction, DoorSet, GridPosition, HazardKind, Item, ItemId, ItemKind, Level, RoomCategory,
    RoomId,
};

pub struct LevelGenerator {
    config: GenerationConfig,
    catalog: Catalog,
    progress: LevelProgress,
    level: Level,
    random: Box<dyn RandomSource>,
    next_item_serial: u64,
}

impl LevelGenerator {
    pub fn new(config: GenerationConfig, random: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            catalog: Catalog::new(),
            progress: LevelProgress::default(),
            level: Level::Lobby,
            random,
            next_item_serial: 0,
        }
    }

    pub fn seeded(run_seed: u64, config: GenerationConfig) -> Self {
        let seed = derive_stream_seed(run_seed, RandomStream::Generation);
        Self::new(config, Box::new(SeededRandom::new(seed)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn room(&self, position: GridPosition) -> Option<&Room> {
        self.catalog.get(position)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    /// Places the level's fixed start room at the origin with all four doors open.
    /// Returns the existing room when the origin is already generated.
    pub fn generate_start(&mut self, level: Level) -> &Room {
        self.level = level;
        if let Some(id) = self.catalog.id_at(GridPosition::ORIGIN) {
            debug!("start room already present for {level:?}");
            return &self.catalog[id];
        }

        let category = match level {
            Level::Lobby => RoomCategory::Ordinary,
            Level::GridRooms => RoomCategory::Grid,
        };
        let mut room = Room::new(GridPosition::ORIGIN, category, DoorSet::ALL, level);
        room.visited = true;
        room.items = starting_items(level).iter().map(|kind| self.mint_item(*kind)).collect();

        let id = self.catalog.insert(room);
        &self.catalog[id]
    }

    /// Returns the room one step from `from` in `direction`, creating it on first visit.
    ///
    /// `from` must already be generated; the new room always carries the door
    /// leading back to `from`.
    pub fn generate_room(&mut self, from: GridPosition, direction: Direction) -> &Room {
        debug_assert!(self.catalog.contains(from), "generate_room from ungenerated cell {from:?}");
        let position = from.step(direction);
        if let Some(id) = self.catalog.id_at(position) {
            return &self.catalog[id];
        }

        let random = self.random.as_mut();
        let category = decide_room_type(self.level, &self.progress, &self.config, random);
        let doors = generate_doors(direction, self.config.door_probability, random);
        let item_kinds = roll_items(category, random);
        let hazard = roll_hazard(self.level, category, random);
        let npc = roll_npc(self.level, category, random);
        let is_loop = category == RoomCategory::Ordinary
            && random.chance(self.config.loop_room_probability);

        let mut room = Room::new(position, category, doors, self.level);
        room.items = item_kinds.into_iter().map(|kind| self.mint_item(kind)).collect();
        room.hazard = hazard;
        room.npc = npc;
        room.is_loop = is_loop;

        if matches!(category, RoomCategory::Exit | RoomCategory::Portal) {
            info!(
                "{category:?} room generated at {position:?} after {} rooms",
                self.progress.rooms_generated
            );
        }
        self.progress.record(category);

        let id = self.catalog.insert(room);
        &self.catalog[id]
    }

    /// Adds `door` to the room at `position`. Returns `true` when the door was missing.
    pub fn patch_door(&mut self, position: GridPosition, door: Direction) -> bool {
        let Some(id) = self.catalog.id_at(position) else {
            return false;
        };
        let Some(room) = self.catalog.room_mut(id) else {
            return false;
        };
        let added = room.doors.insert(door);
        if added {
            debug!("patched {door:?} door into room at {position:?}");
        }
        added
    }

    pub fn mark_visited(&mut self, id: RoomId) {
        if let Some(room) = self.catalog.room_mut(id) {
            room.visited = true;
        }
    }

    pub fn take_item(&mut self, room: RoomId, item: ItemId) -> Option<Item> {
        let room = self.catalog.room_mut(room)?;
        let index = room.items.iter().position(|candidate| candidate.id == item)?;
        Some(room.items.remove(index))
    }

    pub fn take_hazard(&mut self, room: RoomId) -> Option<HazardKind> {
        self.catalog.room_mut(room)?.hazard.take()
    }

    /// Resets level-scoped counters for `level`. The Catalog is left untouched;
    /// callers clear it with [`LevelGenerator::clear_catalog`].
    pub fn reset_for_level(&mut self, level: Level) {
        self.level = level;
        self.progress = LevelProgress::default();
    }

    pub fn clear_catalog(&mut self) {
        self.catalog.clear();
    }

    #[cfg(test)]
    pub(crate) fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    fn mint_item(&mut self, kind: ItemKind) -> Item {
        let id = ItemId(self.next_item_serial);
        self.next_item_serial += 1;
        Item { id, kind }
    }
}
