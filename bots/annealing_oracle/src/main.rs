mod annealer;

use annealer::{anneal, Schedule};
use baghchal::{CandidateMoveSet, Move, Qubo};
use clap::Parser;
use oracle_utils::{initialize_logging, Oracle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
struct Args {
    /// How many independent annealing runs to do per move
    #[arg(long, default_value_t = 100)]
    num_reads: usize,

    /// How many sweeps over all variables per run
    #[arg(long, default_value_t = 200)]
    sweeps: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    AnnealingOracle {
        schedule: Schedule {
            num_reads: args.num_reads,
            sweeps: args.sweeps,
            ..Schedule::default()
        },
        rng: StdRng::seed_from_u64(seed),
    }
    .run()
}

/// Solves the QUBO formulation of the move choice by simulated annealing.
struct AnnealingOracle {
    schedule: Schedule,
    rng: StdRng,
}

impl Oracle for AnnealingOracle {
    fn new_game(&mut self, board_size: i8) {
        debug!(board_size, "New game");
    }

    fn select(&mut self, candidates: &CandidateMoveSet) -> Option<Move> {
        let qubo = Qubo::from_candidates(candidates);
        let sample = anneal(&qubo, &self.schedule, &mut self.rng)?;
        debug!(
            num_variables = qubo.num_variables(),
            energy = sample.energy,
            "Annealing done"
        );
        qubo.decode(&sample.bits).or_else(|| {
            warn!("Best sample does not select exactly one move, using the cheapest candidate");
            candidates.min_cost_move()
        })
    }
}
