use baghchal::{select_move, CandidateMoveSet, Move, RandomSelector};
use clap::Parser;
use oracle_utils::{initialize_logging, Oracle};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
struct Args {
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

    RandomOracle {
        selector: RandomSelector::from_seed(seed),
    }
    .run()
}

/// Ignores the costs and picks any capture.
struct RandomOracle {
    selector: RandomSelector,
}

impl Oracle for RandomOracle {
    fn new_game(&mut self, board_size: i8) {
        debug!(board_size, "New game");
    }

    fn select(&mut self, candidates: &CandidateMoveSet) -> Option<Move> {
        select_move(&mut self.selector, candidates).unwrap_or_else(|err| {
            warn!(%err, "Random selection failed");
            None
        })
    }
}
