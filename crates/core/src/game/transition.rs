//! Edge-triggered room transitions on grid-cell change.
//! This module gates crossings against door topology, generates or patches the
//! room on the far side, and arms the cooldown. It does not clamp against walls;
//! the wall guard has already run when a transition is checked.

use log::debug;

use super::collision::{contain, push_back};
use super::*;

impl Game {
    pub(super) fn check_transition(&mut self) -> TickOutcome {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return TickOutcome::CoolingDown;
        }

        let Some(room) = self.current_room() else {
            return TickOutcome::Stayed;
        };
        let (from, doors) = (room.position, room.doors);
        let geometry = &self.config.geometry;
        let cell = GridPosition::from_world(self.avatar.pos, geometry.room_size);
        if cell == self.last_cell {
            return TickOutcome::Stayed;
        }

        let Some(direction) = from.direction_to(cell) else {
            self.avatar.pos = contain(self.avatar.pos, from, geometry);
            debug!("rejected jump from {from:?} to {cell:?}");
            self.events.push(GameEvent::DiagonalJumpRejected { from, to: cell });
            return TickOutcome::DiagonalRejected;
        };

        if !doors.contains(direction) {
            self.avatar.pos = push_back(self.avatar.pos, from, direction, geometry);
            debug!("blocked {direction:?} crossing out of {from:?}: no door");
            self.events.push(GameEvent::IllegalCrossingBlocked { direction });
            return TickOutcome::Blocked { direction };
        }

        let entry_door = direction.opposite();
        let (id, generated) = match self.generator.room(cell).map(|room| room.id) {
            Some(id) => {
                if self.generator.patch_door(cell, entry_door) {
                    self.events.push(GameEvent::DoorPatched { position: cell, door: entry_door });
                }
                (id, false)
            }
            None => (self.generator.generate_room(from, direction).id, true),
        };
        if generated {
            self.rooms_explored += 1;
        }

        self.enter_room(id, Some(direction));
        self.cooldown = self.config.timing.transition_cooldown_ticks;
        TickOutcome::Entered { room: id, generated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn gate_check_pushes_back_without_generating() {
        let mut game = quiet_game(5);
        game.cooldown = 0;
        fence_start_room(&mut game, DoorSet::single(Direction::North));
        // Past the wall guard: the tick raced beyond the south wall.
        game.avatar.pos = WorldPos::new(0.0, 4.3);

        let outcome = game.check_transition();

        assert_eq!(outcome, TickOutcome::Blocked { direction: Direction::South });
        assert_eq!(game.avatar.pos, WorldPos::new(0.0, 3.0));
        assert_eq!(game.catalog().len(), 1);
        assert_eq!(game.cooldown, 0);
        assert!(
            game.events()
                .contains(&GameEvent::IllegalCrossingBlocked { direction: Direction::South })
        );
    }

    #[test]
    fn diagonal_cell_change_is_rejected_and_contained() {
        let mut game = quiet_game(5);
        game.avatar.pos = WorldPos::new(4.4, -4.4);

        let outcome = game.check_transition();

        assert_eq!(outcome, TickOutcome::DiagonalRejected);
        assert_eq!(game.avatar.pos, WorldPos::new(3.0, -3.0));
        assert_eq!(game.catalog().len(), 1);
        assert_eq!(game.last_cell, GridPosition::ORIGIN);
        assert!(game.events().contains(&GameEvent::DiagonalJumpRejected {
            from: GridPosition::ORIGIN,
            to: GridPosition::new(1, -1),
        }));
    }

    #[test]
    fn cooldown_suppresses_transition_work() {
        let mut game = quiet_game(5);
        game.cooldown = 2;
        game.avatar.pos = WorldPos::new(0.0, 4.5);

        assert_eq!(game.check_transition(), TickOutcome::CoolingDown);
        assert_eq!(game.check_transition(), TickOutcome::CoolingDown);
        assert_eq!(game.catalog().len(), 1);

        let outcome = game.check_transition();
        assert!(matches!(outcome, TickOutcome::Entered { generated: true, .. }));
        assert_eq!(game.cooldown, game.config.timing.transition_cooldown_ticks);
    }

    #[test]
    fn entering_an_existing_room_from_a_blank_side_patches_its_door() {
        let mut game = quiet_game(5);
        let below =
            place_room(&mut game, GridPosition::new(0, 1), DoorSet::single(Direction::East));
        game.avatar.pos = WorldPos::new(0.0, 4.2);

        let outcome = game.check_transition();

        assert_eq!(outcome, TickOutcome::Entered { room: below, generated: false });
        let room = game.room(GridPosition::new(0, 1)).expect("placed room");
        assert!(room.doors.contains(Direction::North));
        assert!(room.doors.contains(Direction::East));
        assert!(room.visited);
        assert_eq!(game.rooms_explored(), 0);
        assert!(game.events().contains(&GameEvent::DoorPatched {
            position: GridPosition::new(0, 1),
            door: Direction::North,
        }));
        assert_eq!(game.avatar.pos, WorldPos::new(0.0, 5.5));
    }
}
