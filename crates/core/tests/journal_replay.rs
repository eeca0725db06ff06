use backrooms_core::journal_file::{JournalWriter, load_journal_from_file};
use backrooms_core::replay::{ReplayResult, apply_input};
use backrooms_core::{Avatar, Config, Game, InputPayload, replay_to_end};
use tempfile::tempdir;

#[test]
fn recorded_file_replays_to_the_live_state() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("runs").join("walk.jsonl");
    let config = Config::default();
    let seed = 2718;

    let mut game = Game::new(seed, config.clone());
    let mut writer =
        JournalWriter::create(&path, seed, "integration", config.fingerprint()).expect("create");
    let mut record = |game: &mut Game, payload: InputPayload| {
        let tick = game.current_tick();
        if apply_input(game, &payload).is_ok() {
            writer.append(tick, &payload).expect("append");
        }
    };

    for _ in 0..3 {
        record(&mut game, InputPayload::avatar(Avatar::at(1.9, 0.1)));
    }
    record(&mut game, InputPayload::PickUp);
    for (x, z) in [(12.0, 0.0), (12.0, 12.0), (0.0, 0.0)] {
        for _ in 0..40 {
            record(&mut game, InputPayload::avatar(Avatar::at(x, z)));
        }
    }
    drop(writer);

    let loaded = load_journal_from_file(&path).expect("load");
    assert_eq!(loaded.journal.seed, seed);
    assert_eq!(loaded.journal.config_hash, config.fingerprint());
    assert_eq!(loaded.journal.inputs.len() as u64, loaded.chain.next_seq());

    let replayed = replay_to_end(&config, &loaded.journal).expect("replay");
    assert_eq!(replayed, ReplayResult::from_game(&game));
}

#[test]
fn journal_from_tuned_config_refuses_default_replay() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tuned.jsonl");
    let tuned = Config::from_toml_str("[timing]\ntransition_cooldown_ticks = 5\n").expect("toml");

    let mut writer = JournalWriter::create(&path, 1, "dev", tuned.fingerprint()).expect("create");
    writer.append(0, &InputPayload::avatar(Avatar::at(0.0, 1.0))).expect("append");
    drop(writer);

    let loaded = load_journal_from_file(&path).expect("load");
    assert!(replay_to_end(&Config::default(), &loaded.journal).is_err());
    assert!(replay_to_end(&tuned, &loaded.journal).is_ok());
}
