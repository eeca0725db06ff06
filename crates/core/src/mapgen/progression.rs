//! Room category policy: milestone-gated rare rooms, anti-repetition, early-game floor.

use serde::{Deserialize, Serialize};

use crate::config::{CategoryWeights, GenerationConfig, MilestoneRule, ReliefWeights};
use crate::random::RandomSource;
use crate::types::{Level, RoomCategory};

/// Level-scoped counters consulted by the policy. Reset on level transition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub rooms_generated: u32,
    /// Consecutive ordinary rooms ending at the most recent one.
    pub ordinary_streak: u32,
    pub exit_generated: bool,
    pub portal_generated: bool,
}

impl LevelProgress {
    pub(super) fn record(&mut self, category: RoomCategory) {
        self.rooms_generated += 1;
        if category == RoomCategory::Ordinary {
            self.ordinary_streak += 1;
        } else {
            self.ordinary_streak = 0;
        }
        match category {
            RoomCategory::Exit => self.exit_generated = true,
            RoomCategory::Portal => self.portal_generated = true,
            _ => {}
        }
    }
}

pub(super) fn decide_room_type(
    level: Level,
    progress: &LevelProgress,
    config: &GenerationConfig,
    random: &mut dyn RandomSource,
) -> RoomCategory {
    let milestones = &config.milestones;
    match level {
        Level::GridRooms => {
            if !progress.portal_generated
                && roll_milestone(&milestones.grid_portal, progress, random)
            {
                return RoomCategory::Portal;
            }
            RoomCategory::Grid
        }
        Level::Lobby => {
            if !progress.portal_generated
                && roll_milestone(&milestones.lobby_portal, progress, random)
            {
                return RoomCategory::Portal;
            }
            if !progress.exit_generated && roll_milestone(&milestones.lobby_exit, progress, random)
            {
                return RoomCategory::Exit;
            }
            if progress.ordinary_streak >= config.ordinary_run_limit {
                return draw_relief(&config.relief_weights, random);
            }
            if progress.rooms_generated < config.early_ordinary_rooms {
                return RoomCategory::Ordinary;
            }
            draw_weighted(&config.category_weights, random)
        }
    }
}

fn roll_milestone(
    rule: &MilestoneRule,
    progress: &LevelProgress,
    random: &mut dyn RandomSource,
) -> bool {
    rule.chance(progress.rooms_generated).is_some_and(|chance| random.chance(chance))
}

fn draw_relief(weights: &ReliefWeights, random: &mut dyn RandomSource) -> RoomCategory {
    let total = weights.hazardous + weights.hub + weights.secret;
    let roll = random.next_f64() * total;
    if roll < weights.hazardous {
        RoomCategory::Hazardous
    } else if roll < weights.hazardous + weights.hub {
        RoomCategory::Hub
    } else {
        RoomCategory::Secret
    }
}

fn draw_weighted(weights: &CategoryWeights, random: &mut dyn RandomSource) -> RoomCategory {
    let roll = random.next_f64();
    let mut threshold = weights.ordinary;
    if roll < threshold {
        return RoomCategory::Ordinary;
    }
    threshold += weights.hazardous;
    if roll < threshold {
        return RoomCategory::Hazardous;
    }
    threshold += weights.hub;
    if roll < threshold {
        return RoomCategory::Hub;
    }
    RoomCategory::Secret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};

    fn progress_after(rooms_generated: u32, ordinary_streak: u32) -> LevelProgress {
        LevelProgress { rooms_generated, ordinary_streak, ..LevelProgress::default() }
    }

    #[test]
    fn early_rooms_are_ordinary_even_on_high_rolls() {
        let config = GenerationConfig::default();
        let mut random = ScriptedRandom::constant(0.99);
        for rooms in 0..config.ordinary_run_limit {
            let category =
                decide_room_type(Level::Lobby, &progress_after(rooms, rooms), &config, &mut random);
            assert_eq!(category, RoomCategory::Ordinary);
        }
    }

    #[test]
    fn ordinary_run_is_broken_before_early_floor_applies() {
        let config = GenerationConfig::default();
        let mut random = ScriptedRandom::constant(0.0);
        let category = decide_room_type(Level::Lobby, &progress_after(2, 2), &config, &mut random);
        assert_eq!(category, RoomCategory::Hazardous);
    }

    #[test]
    fn relief_draw_follows_relief_weights() {
        let config = GenerationConfig::default();
        let progress = progress_after(5, 2);
        for (roll, expected) in [
            (0.1, RoomCategory::Hazardous),
            (0.65, RoomCategory::Hub),
            (0.95, RoomCategory::Secret),
        ] {
            let mut random = ScriptedRandom::constant(roll);
            assert_eq!(decide_room_type(Level::Lobby, &progress, &config, &mut random), expected);
        }
    }

    #[test]
    fn weighted_draw_covers_every_base_category() {
        let config = GenerationConfig::default();
        let progress = progress_after(4, 0);
        for (roll, expected) in [
            (0.0, RoomCategory::Ordinary),
            (0.69, RoomCategory::Ordinary),
            (0.75, RoomCategory::Hazardous),
            (0.92, RoomCategory::Hub),
            (0.97, RoomCategory::Secret),
        ] {
            let mut random = ScriptedRandom::constant(roll);
            assert_eq!(decide_room_type(Level::Lobby, &progress, &config, &mut random), expected);
        }
    }

    #[test]
    fn portal_outranks_exit_once_both_are_eligible() {
        let config = GenerationConfig::default();
        let mut random = ScriptedRandom::constant(0.0);
        let category = decide_room_type(Level::Lobby, &progress_after(12, 0), &config, &mut random);
        assert_eq!(category, RoomCategory::Portal);

        let portal_done = LevelProgress { portal_generated: true, ..progress_after(12, 0) };
        let category = decide_room_type(Level::Lobby, &portal_done, &config, &mut random);
        assert_eq!(category, RoomCategory::Exit);
    }

    #[test]
    fn exit_is_never_chosen_below_threshold_or_twice() {
        let config = GenerationConfig::default();
        let mut random = ScriptedRandom::constant(0.0);
        let below = LevelProgress { portal_generated: true, ..progress_after(9, 0) };
        let category = decide_room_type(Level::Lobby, &below, &config, &mut random);
        assert_ne!(category, RoomCategory::Exit);

        let done =
            LevelProgress { portal_generated: true, exit_generated: true, ..progress_after(30, 0) };
        assert_ne!(decide_room_type(Level::Lobby, &done, &config, &mut random), RoomCategory::Exit);
    }

    #[test]
    fn grid_level_only_yields_grid_or_portal() {
        let config = GenerationConfig::default();
        let mut random = SeededRandom::new(5);
        let mut progress = LevelProgress::default();
        for _ in 0..200 {
            let category = decide_room_type(Level::GridRooms, &progress, &config, &mut random);
            assert!(matches!(category, RoomCategory::Grid | RoomCategory::Portal));
            if category == RoomCategory::Portal {
                assert!(progress.rooms_generated >= config.milestones.grid_portal.min_rooms);
                assert!(!progress.portal_generated);
            }
            progress.record(category);
        }
        assert!(progress.portal_generated, "portal chance reaches its cap well before 200 rooms");
    }

    #[test]
    fn record_tracks_streak_and_flags() {
        let mut progress = LevelProgress::default();
        progress.record(RoomCategory::Ordinary);
        progress.record(RoomCategory::Ordinary);
        assert_eq!(progress.ordinary_streak, 2);
        progress.record(RoomCategory::Exit);
        assert_eq!(progress.ordinary_streak, 0);
        assert!(progress.exit_generated);
        assert_eq!(progress.rooms_generated, 3);
    }
}
