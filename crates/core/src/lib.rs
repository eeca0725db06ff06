pub mod config;
pub mod content;
pub mod dialogue;
pub mod events;
pub mod game;
pub mod journal;
pub mod journal_file;
pub mod mapgen;
pub mod random;
pub mod replay;
pub mod types;

pub use config::{Config, ConfigError};
pub use events::{GameEvent, TickOutcome, TickResult};
pub use game::{Game, GameError};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use replay::*;
pub use types::*;
