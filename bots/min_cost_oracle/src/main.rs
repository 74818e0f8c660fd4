use baghchal::{select_move, CandidateMoveSet, MinCostSelector, Move};
use clap::Parser;
use oracle_utils::{initialize_logging, Oracle};
use tracing::trace;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
struct Args {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    MinCostOracle {}.run()
}

/// Looks at every candidate and takes the cheapest one.
struct MinCostOracle {}

impl Oracle for MinCostOracle {
    fn new_game(&mut self, _board_size: i8) {}

    fn select(&mut self, candidates: &CandidateMoveSet) -> Option<Move> {
        trace!(num_candidates = candidates.len());
        select_move(&mut MinCostSelector, candidates).ok().flatten()
    }
}
