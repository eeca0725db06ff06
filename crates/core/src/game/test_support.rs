//! Shared test fixtures for the `game` submodule test suites.
//! It does not own production gameplay logic.

use super::*;
use crate::dialogue::SilentDialogue;

/// Default-tuned run whose companion never talks, so event lists stay short.
pub(crate) fn quiet_game(seed: u64) -> Game {
    Game::with_dialogue(seed, Config::default(), Box::new(SilentDialogue))
}

/// Inserts an empty ordinary room at `position`, bypassing the generation policy.
pub(crate) fn place_room(game: &mut Game, position: GridPosition, doors: DoorSet) -> RoomId {
    let level = game.generator.level();
    let room = Room::new(position, RoomCategory::Ordinary, doors, level);
    game.generator.catalog_mut().insert(room)
}

pub(crate) fn fence_start_room(game: &mut Game, doors: DoorSet) {
    edit_current_room(game, |room| room.doors = doors);
}

pub(crate) fn set_current_category(game: &mut Game, category: RoomCategory) {
    edit_current_room(game, |room| room.category = category);
}

fn edit_current_room(game: &mut Game, edit: impl FnOnce(&mut Room)) {
    let id = game.current_room.expect("game always has a current room");
    let room = game.generator.catalog_mut().room_mut(id).expect("current room is live");
    edit(room);
}

/// Feeds `target` for `ticks` ticks and returns the last outcome.
pub(crate) fn hold(game: &mut Game, target: WorldPos, ticks: u32) -> TickOutcome {
    let mut outcome = TickOutcome::Stayed;
    for _ in 0..ticks {
        outcome = game.tick(Avatar { pos: target, status: game.avatar.status }).outcome;
    }
    outcome
}
