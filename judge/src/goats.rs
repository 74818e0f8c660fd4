use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use baghchal::{Game, InvalidPlacement, Position};
use tracing::warn;

/// Where the goat placements come from.
pub trait GoatSource {
    /// The next position to place a goat on, or `None` if there are no more.
    fn next_placement(&mut self, game: &Game) -> anyhow::Result<Option<Position>>;

    /// Called when the game refused the last placement.
    fn rejected(&mut self, pos: Position, err: &InvalidPlacement) -> anyhow::Result<()>;
}

/// Asks a human, showing the board before every placement.
///
/// Unparseable input is reported and asked for again.
pub struct InteractiveGoats<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveGoats<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> GoatSource for InteractiveGoats<R, W> {
    fn next_placement(&mut self, game: &Game) -> anyhow::Result<Option<Position>> {
        writeln!(self.output, "{}", game.board())?;
        let mut buf = String::new();
        loop {
            write!(
                self.output,
                "Goats left to place: {}. Place a goat at (row col): ",
                game.goats_remaining()
            )?;
            self.output.flush()?;

            buf.clear();
            if self.input.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            let line = buf.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<Position>() {
                Ok(pos) => return Ok(Some(pos)),
                Err(err) => writeln!(self.output, "Invalid input: {}", err)?,
            }
        }
    }

    fn rejected(&mut self, _pos: Position, err: &InvalidPlacement) -> anyhow::Result<()> {
        writeln!(self.output, "{}. Try again.", err)?;
        Ok(())
    }
}

/// Replays placements prepared in advance, e.g. from a file.
#[derive(Clone, Debug, Default)]
pub struct ScriptedGoats {
    placements: VecDeque<Position>,
}

impl ScriptedGoats {
    /// Reads one position per line. Blank lines and lines starting with `#`
    /// are skipped.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read goat script {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid goat script {}", path.display()))
    }

    pub fn parse(script: &str) -> anyhow::Result<Self> {
        let mut placements = VecDeque::new();
        for (line_idx, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let pos = line
                .parse::<Position>()
                .with_context(|| format!("Line {}: {:?}", line_idx + 1, line))?;
            placements.push_back(pos);
        }
        Ok(Self { placements })
    }

    pub fn remaining(&self) -> usize {
        self.placements.len()
    }
}

impl FromIterator<Position> for ScriptedGoats {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        Self {
            placements: iter.into_iter().collect(),
        }
    }
}

impl GoatSource for ScriptedGoats {
    fn next_placement(&mut self, _game: &Game) -> anyhow::Result<Option<Position>> {
        Ok(self.placements.pop_front())
    }

    fn rejected(&mut self, pos: Position, err: &InvalidPlacement) -> anyhow::Result<()> {
        warn!(%pos, %err, "Skipping scripted placement");
        Ok(())
    }
}
