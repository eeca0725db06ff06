//! Outbound notifications and per-tick results consumed by presentation.

use crate::mapgen::Room;
use crate::types::{Direction, GridPosition, HazardKind, Item, Level, NpcKind, RoomId, WorldPos};

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Fired once per successful transition, after the avatar has been repositioned.
    RoomEntered { room: Room },
    IllegalCrossingBlocked { direction: Direction },
    DiagonalJumpRejected { from: GridPosition, to: GridPosition },
    DoorPatched { position: GridPosition, door: Direction },
    LoopRoomWarning { position: GridPosition },
    ExitAvailable { position: GridPosition },
    PortalAvailable { position: GridPosition, target: Level },
    NpcPresent { position: GridPosition, npc: NpcKind },
    HazardSpawned { room: RoomId, kind: HazardKind, at: WorldPos },
    NpcSpawned { room: RoomId, kind: NpcKind, at: WorldPos },
    Dialogue { line: String },
    ItemPickedUp { item: Item },
    LevelChanged { from: Level, to: Level },
    Escaped { rooms_explored: u32 },
    Restarted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Avatar stayed within the last known cell.
    Stayed,
    CoolingDown,
    Entered { room: RoomId, generated: bool },
    Blocked { direction: Direction },
    DiagonalRejected,
    /// The run has ended; the tick did nothing.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickResult {
    pub tick: u64,
    pub outcome: TickOutcome,
}
