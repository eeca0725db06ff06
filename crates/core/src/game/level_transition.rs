//! Level changes through portals, escaping through an exit, and restarting.
//! Every path rebuilds the Catalog from a fresh start room; pending deferred
//! effects stay queued and die against the new room ids.

use log::info;

use super::*;

impl Game {
    /// Takes the portal in the current room to the other level.
    pub fn use_portal(&mut self) -> Result<Level, GameError> {
        self.ensure_running()?;
        if self.current_room().map(|room| room.category) != Some(RoomCategory::Portal) {
            return Err(GameError::NoPortalHere);
        }
        let from = self.generator.level();
        let to = from.portal_target();
        info!("portal taken from level {} to level {}", from.number(), to.number());
        self.events.push(GameEvent::LevelChanged { from, to });
        self.install_level(to);
        Ok(to)
    }

    /// Leaves through the exit in the current room, ending the run.
    pub fn escape(&mut self) -> Result<u32, GameError> {
        self.ensure_running()?;
        if self.current_room().map(|room| room.category) != Some(RoomCategory::Exit) {
            return Err(GameError::NoExitHere);
        }
        self.phase = RunPhase::Escaped;
        info!("escaped after exploring {} rooms", self.rooms_explored);
        self.events.push(GameEvent::Escaped { rooms_explored: self.rooms_explored });
        Ok(self.rooms_explored)
    }

    /// Throws the run away and starts over in a fresh lobby.
    pub fn restart(&mut self) {
        info!("restarting run at tick {}", self.tick);
        self.phase = RunPhase::Exploring;
        self.rooms_explored = 0;
        self.events.push(GameEvent::Restarted);
        self.install_level(Level::Lobby);
    }

    pub(super) fn install_level(&mut self, level: Level) {
        self.generator.clear_catalog();
        self.generator.reset_for_level(level);
        let start = self.generator.generate_start(level).id;

        self.avatar.pos = WorldPos::default();
        self.last_cell = GridPosition::ORIGIN;
        self.cooldown = 0;
        self.spawned_npcs.clear();
        self.enter_room(start, None);
    }
}
