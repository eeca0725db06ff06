//! Per-tick delay queue for spawn and dialogue effects.
//! Effects are bound to the room that scheduled them and no-op once that room
//! is gone or no longer current; nothing is ever cancelled.

use log::debug;

use super::*;
use crate::config::Difficulty;
use crate::content::{hazard_profile, npc_info};

const LIGHT_REPEL_FACTOR: f64 = 0.5;
const NOISE_THRESHOLD: f32 = 0.5;
const NOISE_BONUS: f64 = 0.25;
const HAZARD_SPAWN_SPREAD: f32 = 2.0;
const NPC_SPAWN_SPREAD: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    SpawnHazard { room: RoomId },
    SpawnNpc { room: RoomId },
    AmbientDialogue { room: RoomId },
}

impl DeferredAction {
    pub fn room(self) -> RoomId {
        match self {
            DeferredAction::SpawnHazard { room }
            | DeferredAction::SpawnNpc { room }
            | DeferredAction::AmbientDialogue { room } => room,
        }
    }
}

/// `(ticks_remaining, action)` pairs, kept in scheduling order.
#[derive(Debug, Default)]
pub(super) struct DelayQueue {
    entries: Vec<(u32, DeferredAction)>,
}

impl DelayQueue {
    /// Queues `action` to run on the tick `delay_ticks` after the current one.
    /// A zero delay still waits one tick.
    pub(super) fn schedule(&mut self, delay_ticks: u32, action: DeferredAction) {
        self.entries.push((delay_ticks.max(1), action));
    }

    /// Drains once per tick: entries already at zero are returned, the rest
    /// count down by one.
    pub(super) fn advance(&mut self) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.entries.retain_mut(|(remaining, action)| {
            if *remaining == 0 {
                due.push(*action);
                false
            } else {
                *remaining -= 1;
                true
            }
        });
        due
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Probability that a room's hazard actually appears, given the avatar's status.
pub fn hazard_spawn_chance(
    kind: HazardKind,
    difficulty: Difficulty,
    status: &AvatarStatus,
) -> f64 {
    let profile = hazard_profile(kind);
    let mut chance = difficulty.hazard_spawn_factor();
    if profile.repelled_by_light && status.has_light {
        chance *= LIGHT_REPEL_FACTOR;
    }
    if profile.drawn_by_noise && status.noise_level >= NOISE_THRESHOLD {
        chance += NOISE_BONUS;
    }
    chance.clamp(0.0, 1.0)
}

impl Game {
    pub(super) fn run_due_effects(&mut self) {
        for action in self.deferred.advance() {
            if self.current_room != Some(action.room()) {
                debug!("dropping {action:?}: room is no longer current");
                continue;
            }
            match action {
                DeferredAction::SpawnHazard { room } => self.spawn_hazard(room),
                DeferredAction::SpawnNpc { room } => self.spawn_npc(room),
                DeferredAction::AmbientDialogue { room } => self.ambient_dialogue(room),
            }
        }
    }

    fn spawn_hazard(&mut self, id: RoomId) {
        let Some(room) = self.generator.catalog().room(id) else {
            debug!("dropping hazard spawn: room {id:?} no longer exists");
            return;
        };
        let Some(kind) = room.hazard else {
            return;
        };
        let center = room.position.world_center(self.config.geometry.room_size);
        let chance = hazard_spawn_chance(kind, self.config.difficulty, &self.avatar.status);
        if !self.effects.chance(chance) {
            debug!("{kind:?} stayed hidden at {:?} (chance {chance:.2})", room.position);
            return;
        }

        let at = WorldPos::new(
            center.x + self.effects.spread(HAZARD_SPAWN_SPREAD),
            center.z + self.effects.spread(HAZARD_SPAWN_SPREAD),
        );
        self.generator.take_hazard(id);
        self.events.push(GameEvent::HazardSpawned { room: id, kind, at });

        if let Some(room) = self.generator.catalog().room(id) {
            let context = self.dialogue_context(room, Some(kind));
            self.speak(&context);
        }
    }

    fn spawn_npc(&mut self, id: RoomId) {
        let Some(room) = self.generator.catalog().room(id) else {
            debug!("dropping npc spawn: room {id:?} no longer exists");
            return;
        };
        let Some(kind) = room.npc else {
            return;
        };
        let center = room.position.world_center(self.config.geometry.room_size);
        if !self.spawned_npcs.insert(id) {
            return;
        }
        let at = WorldPos::new(
            center.x + self.effects.spread(NPC_SPAWN_SPREAD),
            center.z + self.effects.spread(NPC_SPAWN_SPREAD),
        );
        debug!("{} appears at {at:?}", npc_info(kind).name);
        self.events.push(GameEvent::NpcSpawned { room: id, kind, at });
    }

    fn ambient_dialogue(&mut self, id: RoomId) {
        let Some(room) = self.generator.catalog().room(id) else {
            return;
        };
        let context = self.dialogue_context(room, None);
        self.speak(&context);
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn room_ids(count: usize) -> Vec<RoomId> {
        let mut keys: SlotMap<RoomId, ()> = SlotMap::with_key();
        (0..count).map(|_| keys.insert(())).collect()
    }

    #[test]
    fn actions_fire_after_their_delay_in_scheduling_order() {
        let rooms = room_ids(2);
        let mut queue = DelayQueue::default();
        queue.schedule(2, DeferredAction::SpawnHazard { room: rooms[0] });
        queue.schedule(1, DeferredAction::AmbientDialogue { room: rooms[1] });
        queue.schedule(2, DeferredAction::SpawnNpc { room: rooms[1] });

        assert!(queue.advance().is_empty(), "nothing fires on the scheduling tick");
        assert_eq!(queue.advance(), vec![DeferredAction::AmbientDialogue { room: rooms[1] }]);
        assert_eq!(
            queue.advance(),
            vec![
                DeferredAction::SpawnHazard { room: rooms[0] },
                DeferredAction::SpawnNpc { room: rooms[1] },
            ]
        );
        assert!(queue.advance().is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn zero_delay_still_waits_for_the_next_drain() {
        let rooms = room_ids(1);
        let mut queue = DelayQueue::default();
        queue.schedule(0, DeferredAction::SpawnNpc { room: rooms[0] });
        assert!(queue.advance().is_empty());
        assert_eq!(queue.advance().len(), 1);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn light_halves_light_shy_hazards_and_noise_draws_others() {
        let quiet_lit = AvatarStatus { has_light: true, ..AvatarStatus::default() };
        let loud = AvatarStatus { noise_level: 0.8, ..AvatarStatus::default() };

        assert_eq!(hazard_spawn_chance(HazardKind::Shadow, Difficulty::Normal, &quiet_lit), 0.5);
        assert_eq!(hazard_spawn_chance(HazardKind::Smiler, Difficulty::Normal, &quiet_lit), 1.0);
        assert_eq!(hazard_spawn_chance(HazardKind::Smiler, Difficulty::Easy, &loud), 0.75);
        assert_eq!(hazard_spawn_chance(HazardKind::Shadow, Difficulty::Easy, &loud), 0.5);
        assert_eq!(hazard_spawn_chance(HazardKind::Shadow, Difficulty::Easy, &quiet_lit), 0.25);
        assert_eq!(hazard_spawn_chance(HazardKind::SkinStealer, Difficulty::Hard, &loud), 1.0);
    }
}
