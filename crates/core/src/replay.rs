use log::{debug, warn};
use thiserror::Error;

use crate::config::Config;
use crate::game::{Game, GameError};
use crate::journal::{InputJournal, InputPayload, JOURNAL_FORMAT_VERSION};
use crate::types::{Level, RunPhase};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("unsupported journal format version {0}")]
    UnsupportedFormatVersion(u16),
    #[error("journal was recorded with config {expected:#018x}, replaying with {found:#018x}")]
    ConfigMismatch { expected: u64, found: u64 },
    #[error("input {seq} was rejected")]
    InputRejected {
        seq: u64,
        #[source]
        error: GameError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_tick: u64,
    pub rooms_generated: u32,
    pub rooms_explored: u32,
    pub level: Level,
    pub phase: RunPhase,
    pub snapshot_hash: u64,
}

impl ReplayResult {
    pub fn from_game(game: &Game) -> Self {
        Self {
            final_tick: game.current_tick(),
            rooms_generated: game.progress().rooms_generated,
            rooms_explored: game.rooms_explored(),
            level: game.level(),
            phase: game.phase(),
            snapshot_hash: game.snapshot_hash(),
        }
    }
}

/// Applies one journaled input to a live run.
///
/// Avatar inputs always succeed; a finished run simply reports `Finished`.
pub fn apply_input(game: &mut Game, payload: &InputPayload) -> Result<(), GameError> {
    match payload {
        InputPayload::Avatar { .. } => {
            if let Some(input) = payload.as_avatar() {
                game.tick(input);
            }
            Ok(())
        }
        InputPayload::PickUp => game.pick_up().map(drop),
        InputPayload::UsePortal => game.use_portal().map(drop),
        InputPayload::Escape => game.escape().map(drop),
        InputPayload::Restart => {
            game.restart();
            Ok(())
        }
    }
}

/// Re-runs a recorded journal from its seed and reports where the run ended.
///
/// Inputs that were accepted live must be accepted again; a rejection means the
/// journal and the simulation have diverged.
pub fn replay_to_end(config: &Config, journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    replay_into(config, journal).map(|game| ReplayResult::from_game(&game))
}

/// Re-runs a recorded journal and hands back the live run.
///
/// Events are drained after every input the way a frontend consumes them, so
/// the returned run holds no backlog however long the journal is.
pub fn replay_into(config: &Config, journal: &InputJournal) -> Result<Game, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormatVersion(journal.format_version));
    }
    let found = config.fingerprint();
    if journal.config_hash != found {
        return Err(ReplayError::ConfigMismatch { expected: journal.config_hash, found });
    }

    let mut game = Game::new(journal.seed, config.clone());
    let mut drained = game.drain_events().len();
    for record in &journal.inputs {
        if let Err(error) = apply_input(&mut game, &record.payload) {
            warn!("replay diverged at input {}: {error}", record.seq);
            return Err(ReplayError::InputRejected { seq: record.seq, error });
        }
        drained += game.drain_events().len();
    }

    debug!(
        "replayed {} inputs to tick {} ({drained} events)",
        journal.inputs.len(),
        game.current_tick()
    );
    Ok(game)
}
