//! Snapshot hash over run state and the Catalog's canonical bytes.
//! Replay and determinism checks compare it; the tick loop never reads it.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u16(self.generator.level().number());
        hasher.write_u8(match self.phase {
            RunPhase::Exploring => 0,
            RunPhase::Escaped => 1,
        });
        hasher.write_i32(self.last_cell.grid_x);
        hasher.write_i32(self.last_cell.grid_z);
        hasher.write_u32(self.cooldown);
        hasher.write_u32(self.rooms_explored);
        hasher.write_u32(self.avatar.pos.x.to_bits());
        hasher.write_u32(self.avatar.pos.z.to_bits());
        hasher.write_usize(self.deferred.len());
        hasher.write_usize(self.spawned_npcs.len());

        let progress = self.generator.progress();
        hasher.write_u32(progress.rooms_generated);
        hasher.write_u32(progress.ordinary_streak);
        hasher.write_u8(u8::from(progress.exit_generated));
        hasher.write_u8(u8::from(progress.portal_generated));

        if let Some(room) = self.current_room() {
            hasher.write_i32(room.position.grid_x);
            hasher.write_i32(room.position.grid_z);
        }
        hasher.write(&self.generator.catalog().canonical_bytes());
        hasher.finish()
    }
}
