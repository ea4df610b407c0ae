use anyhow::{Result, bail};
use clap::Parser;
use fogwalk_core::{
    AdvanceStopReason, EngineConfig, NavEvent, RunOutcome, TileKind,
    mapgen::{LatticeParams, generate_lattice},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Lattice side length
    #[arg(long, default_value_t = 12)]
    size: usize,
}

#[derive(Default)]
struct Tally {
    completed: u32,
    stuck: u32,
    moves: u64,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("FOGWALK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut tally = Tally::default();

    for _ in 0..args.runs {
        let run_seed = rng.next_u64();
        let params = LatticeParams {
            width: args.size.max(2),
            height: args.size.max(2),
            wall_percent: choose(&mut rng, &[5, 15, 30]),
            gate_percent: choose(&mut rng, &[0, 10, 25]),
            sight_radius: choose(&mut rng, &[0, 1, 3, 6]),
            objective_count: choose(&mut rng, &[1, 3, 5]),
            ..Default::default()
        };
        debug!(run_seed, ?params, "generated lattice");

        match check_run(run_seed, &params)? {
            (RunOutcome::Completed, moves) => {
                tally.completed += 1;
                tally.moves += moves;
            }
            (RunOutcome::Stuck { .. }, moves) => {
                tally.stuck += 1;
                tally.moves += moves;
            }
            (outcome, _) => bail!("seed {run_seed}: unexpected outcome {outcome:?}"),
        }
    }

    info!(completed = tally.completed, stuck = tally.stuck, moves = tally.moves, "fuzz finished");
    println!(
        "Fuzzing completed successfully: {} completed, {} stuck, {} moves.",
        tally.completed, tally.stuck, tally.moves
    );
    Ok(())
}

/// Runs one scenario a move at a time and checks every step against the state before it.
fn check_run(seed: u64, params: &LatticeParams) -> Result<(RunOutcome, u64)> {
    let mut run = generate_lattice(seed, params).into_expedition(EngineConfig::default())?;
    let mut seen = 0usize;

    let outcome = loop {
        let grid_before = run.grid().clone();
        let mut held = run.keys().clone();
        let from = run.position();
        let result = run.advance(1);

        assert!(result.moves <= 1, "Invariant failed: advance(1) moved {} times", result.moves);
        assert!(
            run.grid().revealed_count() >= grid_before.revealed_count(),
            "Invariant failed: revealed set shrank (seed {seed})"
        );
        for event in &run.log()[seen..] {
            // A key chosen earlier in the same call already applies to later moves.
            if let NavEvent::KeyChosen { key } = event {
                held.insert(*key);
            }
            if let NavEvent::Moved { to } = event {
                assert!(
                    grid_before.edge_weight(from, *to).is_some(),
                    "Invariant failed: {from} -> {to} is not an edge (seed {seed})"
                );
                let tile = grid_before.tile_at(*to);
                assert!(tile != TileKind::Wall, "Invariant failed: traveler inside wall (seed {seed})");
                assert!(
                    !grid_before.is_revealed(*to) || held.unlocks(tile),
                    "Invariant failed: entered known locked gate {to} (seed {seed})"
                );
            }
        }
        seen = run.log().len();

        if let AdvanceStopReason::Finished(outcome) = result.stop_reason {
            break outcome;
        }
    };
    Ok((outcome, run.moves()))
}
