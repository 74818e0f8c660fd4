use std::io::{BufRead, Write};

use baghchal::{CandidateMoveSet, Move, Okay, Request, SelectMoveResponse};
use tracing::{debug, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// A trait to simplify writing oracles.
pub trait Oracle {
    fn new_game(&mut self, board_size: i8);

    /// Picks one of the candidates, which are never empty.
    fn select(&mut self, candidates: &CandidateMoveSet) -> Option<Move>;

    /// Serves requests from the judge until it says goodbye or closes the pipe.
    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        self.serve(stdin, stdout)
    }

    fn serve(&mut self, mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because read_line() appends to the buffer
            let num_bytes_read = input.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { board_size } => {
                    self.new_game(board_size);
                    serde_json::to_writer(&mut output, &Okay())?;
                }
                Request::SelectMove { turn, candidates } => {
                    let candidates = CandidateMoveSet::from_iter(candidates);
                    let selection = self.select(&candidates);
                    match selection {
                        Some(mv) => debug!(turn, %mv, "Selected"),
                        None => warn!(turn, "No selection"),
                    }
                    serde_json::to_writer(&mut output, &SelectMoveResponse { turn, selection })?
                }
                Request::Bye => break Ok(()),
            }
            writeln!(output)?;
            output.flush()?;
        }
    }
}

/// Logs to stderr, since stdout is reserved for talking to the judge.
pub fn initialize_logging(level: LevelFilter) {
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
