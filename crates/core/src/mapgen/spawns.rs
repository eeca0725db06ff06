//! Per-category item, hazard, and NPC tables.

use crate::random::RandomSource;
use crate::types::{HazardKind, ItemKind, Level, NpcKind, RoomCategory};

/// Independent Bernoulli draws; a room may roll none, one, or several items.
pub(super) fn item_table(category: RoomCategory) -> &'static [(ItemKind, f64)] {
    match category {
        RoomCategory::Ordinary => &[(ItemKind::AlmondWater, 0.3), (ItemKind::Battery, 0.1)],
        RoomCategory::Hazardous => &[(ItemKind::Key, 0.4)],
        RoomCategory::Hub => &[(ItemKind::AlmondWater, 1.0), (ItemKind::Battery, 0.5)],
        RoomCategory::Secret => &[(ItemKind::Lighter, 1.0), (ItemKind::Newspaper, 1.0)],
        RoomCategory::Grid => &[(ItemKind::AlmondWater, 0.5), (ItemKind::Battery, 0.3)],
        RoomCategory::Portal => &[(ItemKind::AlmondWater, 0.4)],
        RoomCategory::Exit => &[],
    }
}

pub(super) fn starting_items(level: Level) -> &'static [ItemKind] {
    match level {
        Level::Lobby => &[ItemKind::OilLamp, ItemKind::AlmondWater],
        Level::GridRooms => &[ItemKind::AlmondWater],
    }
}

pub(super) fn roll_items(category: RoomCategory, random: &mut dyn RandomSource) -> Vec<ItemKind> {
    item_table(category)
        .iter()
        .filter(|(_, probability)| random.chance(*probability))
        .map(|(kind, _)| *kind)
        .collect()
}

pub(super) fn roll_hazard(
    level: Level,
    category: RoomCategory,
    random: &mut dyn RandomSource,
) -> Option<HazardKind> {
    if level.suppresses_hazards() {
        return None;
    }
    match category {
        RoomCategory::Ordinary if random.chance(0.15) => Some(HazardKind::Smiler),
        RoomCategory::Hazardous if random.chance(0.4) => {
            if random.chance(0.5) {
                Some(HazardKind::SkinStealer)
            } else {
                Some(HazardKind::Shadow)
            }
        }
        RoomCategory::Secret if random.chance(0.3) => Some(HazardKind::Partygoer),
        _ => None,
    }
}

const GRID_NPCS: [NpcKind; 3] = [NpcKind::Wanderer, NpcKind::Collector, NpcKind::Scholar];

pub(super) fn roll_npc(
    level: Level,
    category: RoomCategory,
    random: &mut dyn RandomSource,
) -> Option<NpcKind> {
    match (level, category) {
        (Level::GridRooms, RoomCategory::Grid) if random.chance(0.4) => {
            Some(GRID_NPCS[random.index(GRID_NPCS.len())])
        }
        (Level::Lobby, RoomCategory::Hub) if random.chance(0.3) => Some(NpcKind::Wanderer),
        (Level::Lobby, RoomCategory::Secret) if random.chance(0.2) => Some(NpcKind::Scholar),
        _ => None,
    }
}
