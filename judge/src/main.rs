use std::path::PathBuf;
use std::time::Duration;

use baghchal::{GameConfig, MinCostSelector, MoveSelector, RandomSelector, WithFallback};
use clap::{Parser, ValueEnum};
use judge::{
    load_game_config, play_game, ExternalOracle, GoatSource, InteractiveGoats, OracleConfig,
    ScriptedGoats,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a game config JSON file. Without one, the standard 5x5 game is played
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the config JSON file of an external oracle that selects the tiger moves
    #[arg(short, long)]
    oracle: Option<PathBuf>,

    /// The built-in tiger move selector, used when no oracle is given
    #[arg(short, long, value_enum, default_value_t = Selector::MinCost)]
    selector: Selector,

    /// A file with one goat position per line. Goats are read from stdin otherwise
    #[arg(short, long)]
    goats: Option<PathBuf>,

    /// How long the oracle may take to answer, in milliseconds
    #[arg(short, long, default_value_t = 2000)]
    timeout_ms: u64,

    /// RNG seed for the random selector
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum Selector {
    MinCost,
    Random,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = match &args.config {
        Some(path) => load_game_config(path)?,
        None => GameConfig::default(),
    };

    let mut selector: Box<dyn MoveSelector> = match &args.oracle {
        Some(path) => {
            let oracle_config = OracleConfig::load(path)?;
            let mut oracle =
                ExternalOracle::spawn(&oracle_config, Duration::from_millis(args.timeout_ms))?;
            oracle.new_game(config.board_size)?;
            info!(oracle = %oracle_config.nick, "Oracle ready");
            Box::new(WithFallback::new(oracle))
        }
        None => match args.selector {
            Selector::MinCost => Box::new(MinCostSelector),
            Selector::Random => {
                let seed = args.seed.unwrap_or_else(rand::random);
                info!(seed);
                Box::new(RandomSelector::from_seed(seed))
            }
        },
    };

    let mut goats: Box<dyn GoatSource> = match &args.goats {
        Some(path) => Box::new(ScriptedGoats::load(path)?),
        None => Box::new(InteractiveGoats::new(
            std::io::stdin().lock(),
            std::io::stdout(),
        )),
    };

    let report = play_game(&config, &mut *selector, &mut *goats)?;

    println!("{}", report.final_board);
    match report.outcome {
        Some(outcome) => println!("Game over: {}", outcome),
        None => println!("Game abandoned, no more goat placements"),
    }
    println!(
        "Goats placed: {}, captured: {}, left on the board: {}",
        report.goats_placed,
        report.goats_captured,
        report.final_board.goat_count()
    );

    Ok(())
}

/// Logs to stderr, so that the board and prompts on stdout stay readable.
fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
