use crate::types::{HazardKind, ItemKind, NpcKind, RoomCategory};

pub struct ItemInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub usable: bool,
}

pub fn item_info(kind: ItemKind) -> ItemInfo {
    match kind {
        ItemKind::AlmondWater => ItemInfo {
            name: "Almond Water",
            description: "Restores 30 sanity.",
            usable: true,
        },
        ItemKind::OilLamp => ItemInfo {
            name: "Oil Lamp",
            description: "Lights the dark and drives shadows back.",
            usable: true,
        },
        ItemKind::Battery => ItemInfo {
            name: "Battery",
            description: "Refuels the lamp.",
            usable: true,
        },
        ItemKind::Key => ItemInfo {
            name: "Key",
            description: "Sharp enough to fend off a skin stealer.",
            usable: true,
        },
        ItemKind::Lighter => ItemInfo {
            name: "Lighter",
            description: "Still sparks after all this time.",
            usable: false,
        },
        ItemKind::Newspaper => ItemInfo {
            name: "Old Newspaper",
            description: "The date is smudged past reading.",
            usable: false,
        },
    }
}

/// Behaviour row for the external entity updater. The generator only assigns the kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HazardProfile {
    pub damage_per_second: f32,
    pub speed: f32,
    pub repelled_by_light: bool,
    pub drawn_by_noise: bool,
}

pub fn hazard_profile(kind: HazardKind) -> HazardProfile {
    match kind {
        HazardKind::Smiler => HazardProfile {
            damage_per_second: 15.0,
            speed: 2.5,
            repelled_by_light: false,
            drawn_by_noise: true,
        },
        HazardKind::SkinStealer => HazardProfile {
            damage_per_second: 20.0,
            speed: 4.5,
            repelled_by_light: false,
            drawn_by_noise: true,
        },
        HazardKind::Shadow => HazardProfile {
            damage_per_second: 10.0,
            speed: 3.0,
            repelled_by_light: true,
            drawn_by_noise: false,
        },
        HazardKind::Partygoer => HazardProfile {
            damage_per_second: 8.0,
            speed: 2.0,
            repelled_by_light: false,
            drawn_by_noise: false,
        },
    }
}

pub struct NpcInfo {
    pub name: &'static str,
    pub personality: &'static str,
    pub carries: &'static [ItemKind],
}

pub fn npc_info(kind: NpcKind) -> NpcInfo {
    match kind {
        NpcKind::Wanderer => NpcInfo {
            name: "Wanderer",
            personality: "Tired but friendly, eager for company, knows the basics.",
            carries: &[ItemKind::AlmondWater],
        },
        NpcKind::Collector => NpcInfo {
            name: "Collector",
            personality: "Wary hoarder who shares only when persuaded.",
            carries: &[ItemKind::AlmondWater, ItemKind::Battery, ItemKind::Key],
        },
        NpcKind::Scholar => NpcInfo {
            name: "Scholar",
            personality: "Curious researcher who loves to explain the place.",
            carries: &[ItemKind::Newspaper, ItemKind::Key, ItemKind::Lighter],
        },
    }
}

pub fn category_label(category: RoomCategory) -> &'static str {
    match category {
        RoomCategory::Ordinary => "ordinary",
        RoomCategory::Hazardous => "hazardous",
        RoomCategory::Hub => "hub",
        RoomCategory::Secret => "secret",
        RoomCategory::Exit => "exit",
        RoomCategory::Portal => "portal",
        RoomCategory::Grid => "grid",
    }
}
