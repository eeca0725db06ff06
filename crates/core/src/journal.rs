use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::types::{Avatar, AvatarStatus, WorldPos};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub config_hash: u64,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputPayload {
    /// One tick of avatar movement.
    Avatar { x: f32, z: f32, status: AvatarStatus },
    PickUp,
    UsePortal,
    Escape,
    Restart,
}

impl InputPayload {
    pub fn avatar(input: Avatar) -> Self {
        InputPayload::Avatar { x: input.pos.x, z: input.pos.z, status: input.status }
    }

    pub fn as_avatar(&self) -> Option<Avatar> {
        match self {
            InputPayload::Avatar { x, z, status } => {
                Some(Avatar { pos: WorldPos::new(*x, *z), status: *status })
            }
            _ => None,
        }
    }
}

impl InputJournal {
    pub fn new(seed: u64, config: &Config) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            config_hash: config.fingerprint(),
            seed,
            inputs: Vec::new(),
        }
    }

    pub fn append(&mut self, payload: InputPayload) -> u64 {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
        seq
    }
}
