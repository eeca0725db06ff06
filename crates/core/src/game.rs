//! Run state and the per-tick loop: wall guard, transition machine, deferred effects.
//! Submodules split the tick into its stages and the player-issued actions.
//! Rendering and actor AI stay outside; they read `Game` and its events.

use std::collections::BTreeSet;
use std::mem;

use log::debug;
use thiserror::Error;

use crate::config::Config;
use crate::content::category_label;
use crate::dialogue::{DialogueContext, DialogueService, FixedDialogue};
use crate::events::{GameEvent, TickOutcome, TickResult};
use crate::mapgen::{
    Catalog, LevelGenerator, LevelProgress, RandomStream, Room, derive_stream_seed,
};
use crate::random::{RandomSource, SeededRandom};
use crate::types::*;

mod collision;
mod deferred;
mod hash;
mod interaction;
mod level_transition;
mod transition;

#[cfg(test)]
mod test_support;

pub use collision::guard_walls;
pub use deferred::{DeferredAction, hazard_spawn_chance};
pub use interaction::item_position;

use deferred::DelayQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the current room has no portal")]
    NoPortalHere,
    #[error("the current room is not an exit")]
    NoExitHere,
    #[error("the run has already finished")]
    RunFinished,
    #[error("no item within reach")]
    NoItemInReach,
}

pub struct Game {
    seed: u64,
    tick: u64,
    config: Config,
    generator: LevelGenerator,
    current_room: Option<RoomId>,
    last_cell: GridPosition,
    cooldown: u32,
    avatar: Avatar,
    deferred: DelayQueue,
    events: Vec<GameEvent>,
    dialogue: Box<dyn DialogueService>,
    effects: Box<dyn RandomSource>,
    rooms_explored: u32,
    phase: RunPhase,
    spawned_npcs: BTreeSet<RoomId>,
}

impl Game {
    pub fn new(seed: u64, config: Config) -> Self {
        let dialogue = FixedDialogue::seeded(derive_stream_seed(seed, RandomStream::Dialogue));
        Self::with_dialogue(seed, config, Box::new(dialogue))
    }

    pub fn with_dialogue(seed: u64, config: Config, dialogue: Box<dyn DialogueService>) -> Self {
        let generator = LevelGenerator::seeded(seed, config.generation.clone());
        let effects = SeededRandom::new(derive_stream_seed(seed, RandomStream::Effects));
        Self::from_parts(seed, config, generator, Box::new(effects), dialogue)
    }

    /// Assembles a run from explicit collaborators, e.g. scripted random sources.
    pub fn from_parts(
        seed: u64,
        config: Config,
        generator: LevelGenerator,
        effects: Box<dyn RandomSource>,
        dialogue: Box<dyn DialogueService>,
    ) -> Self {
        let mut game = Self {
            seed,
            tick: 0,
            config,
            generator,
            current_room: None,
            last_cell: GridPosition::ORIGIN,
            cooldown: 0,
            avatar: Avatar::default(),
            deferred: DelayQueue::default(),
            events: Vec::new(),
            dialogue,
            effects,
            rooms_explored: 0,
            phase: RunPhase::Exploring,
            spawned_npcs: BTreeSet::new(),
        };
        game.install_level(Level::Lobby);
        game
    }

    /// Advances one tick with the avatar's desired position and status.
    pub fn tick(&mut self, input: Avatar) -> TickResult {
        if self.phase == RunPhase::Escaped {
            return TickResult { tick: self.tick, outcome: TickOutcome::Finished };
        }

        self.avatar.status = input.status;
        self.avatar.pos = self.bounded_step(input.pos);
        if let Some(room) = self.current_room() {
            let (position, doors) = (room.position, room.doors);
            self.avatar.pos = guard_walls(self.avatar.pos, position, doors, &self.config.geometry);
        }

        let outcome = self.check_transition();
        self.run_due_effects();
        self.tick += 1;
        TickResult { tick: self.tick, outcome }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.generator.level()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current_room.and_then(|id| self.generator.catalog().room(id))
    }

    pub fn room(&self, position: GridPosition) -> Option<&Room> {
        self.generator.room(position)
    }

    pub fn catalog(&self) -> &Catalog {
        self.generator.catalog()
    }

    pub fn progress(&self) -> &LevelProgress {
        self.generator.progress()
    }

    pub fn rooms_explored(&self) -> u32 {
        self.rooms_explored
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown
    }

    pub fn pending_effects(&self) -> usize {
        self.deferred.len()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.phase {
            RunPhase::Exploring => Ok(()),
            RunPhase::Escaped => Err(GameError::RunFinished),
        }
    }

    /// Moves towards `target`, at most `max_step_per_tick` per axis.
    fn bounded_step(&self, target: WorldPos) -> WorldPos {
        let max_step = self.config.geometry.max_step_per_tick;
        let axis = |from: f32, to: f32| {
            let delta = to - from;
            if delta.is_finite() { from + delta.clamp(-max_step, max_step) } else { from }
        };
        WorldPos::new(axis(self.avatar.pos.x, target.x), axis(self.avatar.pos.z, target.z))
    }

    /// Makes `room` current, places the avatar at its entrance when arriving
    /// through a door, and queues the room's deferred effects.
    fn enter_room(&mut self, id: RoomId, via: Option<Direction>) {
        self.current_room = Some(id);
        self.generator.mark_visited(id);
        let Some(room) = self.generator.catalog().room(id).cloned() else {
            return;
        };
        if let Some(direction) = via {
            self.avatar.pos =
                collision::entrance_point(room.position, direction, &self.config.geometry);
        }
        self.last_cell = room.position;
        debug!("entered {} room at {:?}", category_label(room.category), room.position);

        let timing = &self.config.timing;
        if room.has_hazard() {
            let action = DeferredAction::SpawnHazard { room: id };
            self.deferred.schedule(timing.hazard_spawn_delay_ticks, action);
        }
        if room.has_npc() && !self.spawned_npcs.contains(&id) {
            self.deferred
                .schedule(timing.npc_spawn_delay_ticks, DeferredAction::SpawnNpc { room: id });
        }
        self.deferred
            .schedule(timing.dialogue_delay_ticks, DeferredAction::AmbientDialogue { room: id });

        let position = room.position;
        let is_loop = room.is_loop;
        let category = room.category;
        let npc = room.npc;
        self.events.push(GameEvent::RoomEntered { room });
        if is_loop {
            self.events.push(GameEvent::LoopRoomWarning { position });
        }
        match category {
            RoomCategory::Exit => self.events.push(GameEvent::ExitAvailable { position }),
            RoomCategory::Portal => self.events.push(GameEvent::PortalAvailable {
                position,
                target: self.generator.level().portal_target(),
            }),
            _ => {}
        }
        if let Some(npc) = npc {
            self.events.push(GameEvent::NpcPresent { position, npc });
        }
    }

    fn dialogue_context(&self, room: &Room, hazard: Option<HazardKind>) -> DialogueContext {
        DialogueContext {
            level: room.level,
            category: room.category,
            hazard,
            is_loop: room.is_loop,
            items_present: room.items.len(),
            rooms_explored: self.rooms_explored,
            sanity: self.avatar.status.sanity,
        }
    }

    fn speak(&mut self, context: &DialogueContext) {
        match self.dialogue.line(context) {
            Some(line) => self.events.push(GameEvent::Dialogue { line }),
            None => debug!("companion stayed quiet"),
        }
    }
}
