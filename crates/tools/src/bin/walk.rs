use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use backrooms_core::journal_file::JournalWriter;
use backrooms_core::replay::apply_input;
use backrooms_core::{
    Avatar, AvatarStatus, Config, Game, GameError, GridPosition, InputPayload, RunPhase,
    TickOutcome, WorldPos,
};
use clap::Parser;
use log::{debug, info};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u32,
    /// Also record every accepted input to this JSONL journal
    #[arg(short, long)]
    journal: Option<PathBuf>,
}

/// Random heading held for a few ticks so the avatar actually reaches walls.
struct Wander {
    target: (f32, f32),
    remaining: u32,
}

fn unit(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u64() >> 40) as f32 / (1u64 << 24) as f32
}

fn next_payload(rng: &mut ChaCha8Rng, game: &Game, wander: &mut Wander) -> InputPayload {
    match rng.next_u64() % 40 {
        0 => return InputPayload::PickUp,
        1 => return InputPayload::UsePortal,
        2 => return InputPayload::Escape,
        _ => {}
    }
    if wander.remaining == 0 {
        wander.target = (unit(rng) * 24.0 - 12.0, unit(rng) * 24.0 - 12.0);
        wander.remaining = 1 + (rng.next_u64() % 12) as u32;
    }
    wander.remaining -= 1;

    let pos = game.avatar().pos;
    let status = AvatarStatus {
        noise_level: unit(rng),
        has_light: rng.next_u64() % 2 == 0,
        ..game.avatar().status
    };
    InputPayload::avatar(Avatar {
        pos: WorldPos::new(pos.x + wander.target.0, pos.z + wander.target.1),
        status,
    })
}

/// Where the last movement tick left the avatar relative to the room graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Movement {
    /// Inside the current room's cell.
    Settled,
    /// The cooldown skipped the transition check; the avatar may stand in a
    /// neighbouring cell it reached through a door.
    CoolingDown,
    Entered { from: GridPosition },
}

fn check_invariants(game: &Game, movement: Movement) -> Result<()> {
    let Some(room) = game.current_room() else {
        bail!("run has no current room");
    };
    let cell = GridPosition::from_world(game.avatar().pos, game.config().geometry.room_size);
    let through_door =
        room.position.direction_to(cell).is_some_and(|dir| room.doors.contains(dir));
    ensure!(
        cell == room.position || through_door,
        "avatar at {cell:?} beyond the doors of {:?}",
        room.position
    );
    if movement != Movement::CoolingDown {
        ensure!(cell == room.position, "avatar at {cell:?} outside room {:?}", room.position);
    }

    if let Movement::Entered { from } = movement {
        let (Some(dir), Some(previous)) = (from.direction_to(room.position), game.room(from)) else {
            bail!("entered {:?} from non-adjacent {from:?}", room.position);
        };
        ensure!(previous.doors.contains(dir), "{from:?} lacks the door it was left through");
        ensure!(room.doors.contains(dir.opposite()), "{:?} lacks its return door", room.position);
    }

    let positions: Vec<_> = game.catalog().iter().map(|room| room.position).collect();
    let mut unique = positions.clone();
    unique.sort_by_key(|pos| (pos.grid_x, pos.grid_z));
    unique.dedup();
    ensure!(unique.len() == positions.len(), "two rooms share a grid cell");
    Ok(())
}

/// Applies one input. Non-movement inputs keep the previous `movement`, except
/// level changes, which always land in the middle of a fresh start room.
fn step(
    game: &mut Game,
    payload: &InputPayload,
    movement: Movement,
) -> Result<Movement, GameError> {
    let Some(input) = payload.as_avatar() else {
        apply_input(game, payload)?;
        return Ok(match payload {
            InputPayload::UsePortal | InputPayload::Restart => Movement::Settled,
            _ => movement,
        });
    };
    let from = game.current_room().map(|room| room.position);
    Ok(match (game.tick(input).outcome, from) {
        (TickOutcome::Entered { .. }, Some(from)) => Movement::Entered { from },
        (TickOutcome::CoolingDown, _) => Movement::CoolingDown,
        _ => Movement::Settled,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Walking seed {} for up to {} ticks...", args.seed, args.ticks);
    let config = Config::default();
    let mut game = Game::new(args.seed, config.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut wander = Wander { target: (0.0, 0.0), remaining: 0 };
    let mut movement = Movement::Settled;
    let mut journal = match &args.journal {
        Some(path) => Some(
            JournalWriter::create(path, args.seed, "walk", config.fingerprint())
                .with_context(|| format!("Failed to create journal: {}", path.display()))?,
        ),
        None => None,
    };

    while game.current_tick() < u64::from(args.ticks) && game.phase() == RunPhase::Exploring {
        let payload = next_payload(&mut rng, &game, &mut wander);
        let tick = game.current_tick();

        movement = match step(&mut game, &payload, movement) {
            Ok(movement) => movement,
            Err(error) => {
                debug!("tick {tick}: {payload:?} rejected: {error}");
                continue;
            }
        };
        if let Some(writer) = journal.as_mut() {
            writer.append(tick, &payload).context("Failed to append to journal")?;
        }
        game.drain_events();

        check_invariants(&game, movement)
            .with_context(|| format!("invariant broken at tick {tick} after {payload:?}"))?;
    }

    let outcome = if game.phase() == RunPhase::Escaped { "escaped" } else { "still exploring" };
    info!("walk ended at tick {}", game.current_tick());
    println!(
        "Walk finished ({outcome}) on {:?} after {} ticks: {} rooms explored, hash {:#018x}",
        game.level(),
        game.current_tick(),
        game.rooms_explored(),
        game.snapshot_hash()
    );
    Ok(())
}
