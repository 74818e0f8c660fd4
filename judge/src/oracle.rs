use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::Context;
use baghchal::{
    CandidateMoveSet, Move, MoveSelector, Okay, Request, SelectMoveResponse, SelectionError,
};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::OracleConfig;

/// How long a departing oracle gets to exit on its own before it is killed.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// A tiger move selector running in a separate process.
///
/// Requests go to the child's stdin, one JSON object per line. A reader
/// thread forwards the lines the child prints, so that waiting for an answer
/// can time out.
pub struct ExternalOracle {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    responses: Receiver<std::io::Result<String>>,
    timeout: Duration,
    turn: u32,
}

impl ExternalOracle {
    pub fn spawn(config: &OracleConfig, timeout: Duration) -> anyhow::Result<Self> {
        let (program, args) = config
            .cmd
            .split_first()
            .context("Oracle command is empty")?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start oracle {}", config.nick))?;
        let stdin = child.stdin.take().context("Could not access stdin")?;
        let stdout = child.stdout.take().context("Could not access stdout")?;

        let (sender, responses) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let failed = line.is_err();
                // The receiving end is gone once the oracle has been dropped
                if sender.send(line).is_err() || failed {
                    break;
                }
            }
        });

        Ok(Self {
            name: config.nick.clone(),
            child,
            stdin,
            responses,
            timeout,
            turn: 0,
        })
    }

    /// Tells the oracle about a new game and waits for its acknowledgement.
    pub fn new_game(&mut self, board_size: i8) -> Result<(), SelectionError> {
        self.send(&Request::NewGame { board_size })?;
        let deadline = Instant::now() + self.timeout;
        let _: Okay = self.receive(deadline)?;
        Ok(())
    }

    fn send(&mut self, req: &Request) -> Result<(), SelectionError> {
        let mut req_json = serde_json::to_string(req)
            .map_err(|err| SelectionError::Unavailable(err.to_string()))?;
        trace!(name: "Sending request", oracle = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin
            .write_all(req_json.as_bytes())
            .and_then(|()| self.stdin.flush())
            .map_err(|err| SelectionError::Unavailable(format!("Could not send request: {}", err)))
    }

    fn receive<T: DeserializeOwned>(&mut self, deadline: Instant) -> Result<T, SelectionError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let line = match self.responses.recv_timeout(remaining) {
            Ok(Ok(line)) => line,
            Ok(Err(err)) => {
                return Err(SelectionError::Unavailable(format!(
                    "Could not read response: {}",
                    err
                )))
            }
            Err(RecvTimeoutError::Timeout) => return Err(SelectionError::Timeout),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(SelectionError::Unavailable(String::from(
                    "The oracle closed its output",
                )))
            }
        };
        trace!(name: "Received response", oracle = &self.name, response = %line);
        serde_json::from_str(line.trim_end())
            .map_err(|err| SelectionError::Unavailable(format!("Malformed response: {}", err)))
    }
}

impl MoveSelector for ExternalOracle {
    fn select(&mut self, candidates: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
        self.turn += 1;
        let turn = self.turn;
        self.send(&Request::SelectMove {
            turn,
            candidates: candidates.to_candidates(),
        })?;

        let deadline = Instant::now() + self.timeout;
        loop {
            let response: SelectMoveResponse = self.receive(deadline)?;
            if response.turn == turn {
                return Ok(response.selection);
            }
            // A late answer to a turn that already timed out
            debug!(
                oracle = &self.name,
                turn,
                stale_turn = response.turn,
                "Discarding stale response"
            );
        }
    }
}

impl Drop for ExternalOracle {
    fn drop(&mut self) {
        if self.send(&Request::Bye).is_err() {
            debug!(oracle = &self.name, "Oracle already gone");
        }
        let deadline = Instant::now() + SHUTDOWN_GRACE;
        loop {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(10))
                }
                _ => break,
            }
        }
        warn!(oracle = &self.name, "Oracle did not exit, killing it");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
