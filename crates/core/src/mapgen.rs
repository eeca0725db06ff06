//! Room catalog and the policy that grows a level one room at a time.

pub mod catalog;
pub mod model;
pub mod progression;

mod doors;
mod generator;
mod seed;
mod spawns;

pub use catalog::Catalog;
pub use generator::LevelGenerator;
pub use model::Room;
pub use progression::LevelProgress;
pub use seed::{RandomStream, derive_stream_seed};
