//! Deterministic seed mixing for the independent random streams of a run.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RandomStream {
    Generation,
    Effects,
    Dialogue,
}

impl RandomStream {
    fn code(self) -> u64 {
        match self {
            RandomStream::Generation => 1,
            RandomStream::Effects => 2,
            RandomStream::Dialogue => 3,
        }
    }
}

pub fn derive_stream_seed(run_seed: u64, stream: RandomStream) -> u64 {
    mix_seed_stream(run_seed, stream.code())
}

fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_are_distinct_for_one_run_seed() {
        let generation = derive_stream_seed(99, RandomStream::Generation);
        let effects = derive_stream_seed(99, RandomStream::Effects);
        let dialogue = derive_stream_seed(99, RandomStream::Dialogue);
        assert_ne!(generation, effects);
        assert_ne!(effects, dialogue);
        assert_ne!(generation, dialogue);
    }

    #[test]
    fn stream_seed_changes_when_inputs_change() {
        let baseline = derive_stream_seed(99, RandomStream::Generation);
        assert_ne!(baseline, derive_stream_seed(98, RandomStream::Generation));
        assert_eq!(baseline, derive_stream_seed(99, RandomStream::Generation));
    }
}
