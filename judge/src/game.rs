use anyhow::Context;
use baghchal::{
    Board, Game, GameConfig, GameOutcome, GoatTurnError, MoveSelector, Phase, TigerTurn,
};
use tracing::{debug, info, warn};

use crate::GoatSource;

/// How a game went.
#[derive(Clone, Debug)]
pub struct GameReport {
    /// `None` if the goat source ran dry before the game was over.
    pub outcome: Option<GameOutcome>,
    pub goats_placed: usize,
    pub goats_captured: usize,
    pub tiger_moves: usize,
    pub final_board: Board,
}

/// Plays one game, alternating between the goat source and the tiger
/// selector until the game is over or the goats stop coming.
///
/// Rejected goat placements are reported back to the source and do not end
/// the game. A failing tiger selection does.
pub fn play_game<S, G>(
    config: &GameConfig,
    selector: &mut S,
    goats: &mut G,
) -> anyhow::Result<GameReport>
where
    S: MoveSelector + ?Sized,
    G: GoatSource + ?Sized,
{
    let mut game = Game::new(config).context("Could not set up the game")?;
    let mut tiger_moves = 0;

    let outcome = loop {
        match game.phase() {
            Phase::AwaitingGoatPlacement => {
                let Some(pos) = goats.next_placement(&game)? else {
                    info!("No more goat placements");
                    break None;
                };
                match game.place_goat(pos) {
                    Ok(_) => debug!(%pos, goats_remaining = game.goats_remaining(), "Goat placed"),
                    Err(GoatTurnError::InvalidPlacement(err)) => {
                        warn!(%pos, %err, "Goat placement rejected");
                        goats.rejected(pos, &err)?;
                    }
                    Err(err) => return Err(err).context("Goat turn failed"),
                }
            }
            Phase::AwaitingTigerMove => {
                match game
                    .play_tiger_turn(selector)
                    .context("Tiger turn failed")?
                {
                    TigerTurn::Captured(mv) => {
                        tiger_moves += 1;
                        info!(%mv, "Tiger captures");
                    }
                    TigerTurn::Immobilized => info!("No tiger can capture"),
                }
                debug!("\n{}", game.board());
            }
            Phase::GameOver(outcome) => {
                info!(%outcome, "Game over");
                break Some(outcome);
            }
        }
    };

    Ok(GameReport {
        outcome,
        goats_placed: game.goats_placed(),
        goats_captured: game.goats_captured(),
        tiger_moves,
        final_board: game.board().clone(),
    })
}
