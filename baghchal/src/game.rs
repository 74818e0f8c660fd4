use serde::{Deserialize, Serialize};

use crate::{
    build_candidate_moves, select_move, Board, CandidateMoveSet, CostPolicy, GoatTurnError,
    InvalidConfig, Move, MoveSelector, Position, Rules, TigerTurnError, BOARD_SIZE,
};

/// How many goats the goat player may place over the course of a game.
pub const GOAT_BUDGET: usize = 15;
/// How many tigers start on the board.
pub const TIGER_COUNT: usize = 3;

pub const MIN_BOARD_SIZE: i8 = 3;
pub const MAX_BOARD_SIZE: i8 = 19;

/// The starting positions of the tigers on a board of the given size:
/// two corners of the top row and the middle of the bottom row.
pub fn bootstrap_tiger_positions(size: i8) -> [Position; TIGER_COUNT] {
    [
        Position::new(0, 0),
        Position::new(0, size - 1),
        Position::new(size - 1, size / 2),
    ]
}

/// Everything that can be varied about a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: i8,
    pub goat_budget: usize,
    /// When not given, the tigers start at [`bootstrap_tiger_positions()`].
    pub tiger_positions: Option<Vec<Position>>,
    #[serde(flatten)]
    pub rules: Rules,
    pub cost_policy: CostPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            goat_budget: GOAT_BUDGET,
            tiger_positions: None,
            rules: Rules::default(),
            cost_policy: CostPolicy::default(),
        }
    }
}

impl GameConfig {
    pub fn tiger_positions(&self) -> Vec<Position> {
        match &self.tiger_positions {
            Some(positions) => positions.clone(),
            None => bootstrap_tiger_positions(self.board_size).to_vec(),
        }
    }

    /// Builds the starting board, which also checks the config.
    pub fn initial_board(&self) -> Result<Board, InvalidConfig> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(InvalidConfig::BoardSizeOutOfRange {
                size: self.board_size,
            });
        }
        let tigers = self.tiger_positions();
        if tigers.is_empty() {
            return Err(InvalidConfig::NoTigers);
        }
        let mut board = Board::empty(self.board_size);
        for (tiger_idx, pos) in tigers.into_iter().enumerate() {
            board
                .place_tiger(pos)
                .map_err(|err| InvalidConfig::TigerPlacement { tiger_idx, err })?;
        }
        Ok(board)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.initial_board().map(|_| ())
    }
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// No tiger could capture anything. The goats win.
    TigersImmobilized,
    /// All goats have been placed.
    PlacementBudgetExhausted,
    /// There is no empty cell left to place a goat on.
    BoardFull,
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::TigersImmobilized => write!(f, "The tigers are immobilized, goats win"),
            GameOutcome::PlacementBudgetExhausted => write!(f, "All goats have been placed"),
            GameOutcome::BoardFull => write!(f, "The board is full"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingGoatPlacement,
    AwaitingTigerMove,
    GameOver(GameOutcome),
}

/// Summarizes the outcome of a tiger turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TigerTurn {
    Captured(Move),
    Immobilized,
}

/// The state of one game, threaded through the turns by its single owner.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    rules: Rules,
    cost_policy: CostPolicy,
    goat_budget: usize,
    goats_placed: usize,
    goats_captured: usize,
    phase: Phase,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, InvalidConfig> {
        let mut game = Self {
            board: config.initial_board()?,
            rules: config.rules,
            cost_policy: config.cost_policy,
            goat_budget: config.goat_budget,
            goats_placed: 0,
            goats_captured: 0,
            phase: Phase::AwaitingGoatPlacement,
        };
        game.phase = game.next_goat_phase();
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn goats_placed(&self) -> usize {
        self.goats_placed
    }

    pub fn goats_remaining(&self) -> usize {
        self.goat_budget.saturating_sub(self.goats_placed)
    }

    pub fn goats_captured(&self) -> usize {
        self.goats_captured
    }

    /// Places the next goat.
    ///
    /// On an invalid placement, nothing changes and the goat player has to try again.
    pub fn place_goat(&mut self, pos: Position) -> Result<Phase, GoatTurnError> {
        if self.phase != Phase::AwaitingGoatPlacement {
            return Err(GoatTurnError::NotGoatsTurn);
        }
        self.board.place_goat(pos)?;
        self.goats_placed += 1;
        self.phase = Phase::AwaitingTigerMove;
        Ok(self.phase)
    }

    /// The legal captures in the current position, weighted by the configured cost policy.
    pub fn candidates(&self) -> CandidateMoveSet {
        build_candidate_moves(&self.board, &self.rules, &self.cost_policy)
    }

    /// Lets `selector` pick a capture and performs it.
    ///
    /// If the selection fails, nothing changes and the turn can be retried.
    pub fn play_tiger_turn<S>(&mut self, selector: &mut S) -> Result<TigerTurn, TigerTurnError>
    where
        S: MoveSelector + ?Sized,
    {
        if self.phase != Phase::AwaitingTigerMove {
            return Err(TigerTurnError::NotTigersTurn);
        }
        let candidates = self.candidates();
        match select_move(selector, &candidates)? {
            Some(mv) => {
                self.apply_capture(&mv)?;
                Ok(TigerTurn::Captured(mv))
            }
            None => {
                self.phase = Phase::GameOver(GameOutcome::TigersImmobilized);
                Ok(TigerTurn::Immobilized)
            }
        }
    }

    fn apply_capture(&mut self, mv: &Move) -> Result<(), TigerTurnError> {
        self.board = self.board.capture(&self.rules, mv)?;
        self.goats_captured += 1;
        self.phase = self.next_goat_phase();
        Ok(())
    }

    fn next_goat_phase(&self) -> Phase {
        if self.goats_placed >= self.goat_budget {
            Phase::GameOver(GameOutcome::PlacementBudgetExhausted)
        } else if self.board.empty_count() == 0 {
            Phase::GameOver(GameOutcome::BoardFull)
        } else {
            Phase::AwaitingGoatPlacement
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, InvalidPlacement, MinCostSelector, SelectionError};

    struct Failing;

    impl MoveSelector for Failing {
        fn select(&mut self, _: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
            Err(SelectionError::Unavailable(String::from("offline")))
        }
    }

    fn single_tiger_game(tiger: (i8, i8)) -> Game {
        Game::new(&GameConfig {
            tiger_positions: Some(vec![Position::new(tiger.0, tiger.1)]),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn initial_state() {
        let game = Game::new(&GameConfig::default()).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingGoatPlacement);
        assert_eq!(game.goats_remaining(), GOAT_BUDGET);
        let tigers: Vec<Position> = game.board().tigers().collect();
        assert_eq!(
            tigers,
            vec![Position::new(0, 0), Position::new(0, 4), Position::new(4, 2)]
        );
        assert_eq!(game.board().goat_count(), 0);
    }

    #[test]
    fn capture_scenario() {
        let mut game = single_tiger_game((0, 0));
        assert_eq!(
            game.place_goat(Position::new(0, 1)),
            Ok(Phase::AwaitingTigerMove)
        );
        let expected = Move {
            origin: Position::new(0, 0),
            destination: Position::new(0, 2),
            captured: Position::new(0, 1),
        };
        assert_eq!(game.candidates().moves().collect::<Vec<_>>(), vec![expected]);

        let turn = game.play_tiger_turn(&mut MinCostSelector).unwrap();
        assert_eq!(turn, TigerTurn::Captured(expected));
        assert_eq!(game.board().get(Position::new(0, 2)), Some(Cell::Tiger));
        assert_eq!(game.board().get(Position::new(0, 0)), Some(Cell::Empty));
        assert_eq!(game.board().get(Position::new(0, 1)), Some(Cell::Empty));
        assert_eq!(game.goats_captured(), 1);
        assert_eq!(game.phase(), Phase::AwaitingGoatPlacement);
    }

    #[test]
    fn immobilized_tigers_end_the_game() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        game.place_goat(Position::new(2, 2)).unwrap();
        assert_eq!(
            game.play_tiger_turn(&mut MinCostSelector).unwrap(),
            TigerTurn::Immobilized
        );
        assert_eq!(
            game.phase(),
            Phase::GameOver(GameOutcome::TigersImmobilized)
        );
        assert_eq!(
            game.place_goat(Position::new(3, 3)),
            Err(GoatTurnError::NotGoatsTurn)
        );
    }

    #[test]
    fn invalid_placement_keeps_state() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        let before = game.board().clone();
        assert_eq!(
            game.place_goat(Position::new(0, 0)),
            Err(GoatTurnError::InvalidPlacement(InvalidPlacement::Occupied {
                pos: Position::new(0, 0),
                occupant: Cell::Tiger
            }))
        );
        assert_eq!(
            game.place_goat(Position::new(7, 0)),
            Err(GoatTurnError::InvalidPlacement(
                InvalidPlacement::OutOfBounds {
                    pos: Position::new(7, 0)
                }
            ))
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.phase(), Phase::AwaitingGoatPlacement);
        assert_eq!(game.goats_placed(), 0);
    }

    #[test]
    fn turn_order_is_enforced() {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        assert!(matches!(
            game.play_tiger_turn(&mut MinCostSelector),
            Err(TigerTurnError::NotTigersTurn)
        ));
        game.place_goat(Position::new(1, 1)).unwrap();
        assert_eq!(
            game.place_goat(Position::new(1, 2)),
            Err(GoatTurnError::NotGoatsTurn)
        );
    }

    #[test]
    fn selection_failure_is_not_game_over() {
        let mut game = single_tiger_game((0, 0));
        game.place_goat(Position::new(0, 1)).unwrap();
        let before = game.board().clone();
        assert!(matches!(
            game.play_tiger_turn(&mut Failing),
            Err(TigerTurnError::Selection(SelectionError::Unavailable(_)))
        ));
        assert_eq!(game.phase(), Phase::AwaitingTigerMove);
        assert_eq!(game.board(), &before);
        // The turn can be retried with another selector
        assert!(matches!(
            game.play_tiger_turn(&mut MinCostSelector),
            Ok(TigerTurn::Captured(_))
        ));
    }

    #[test]
    fn board_full_from_the_start() {
        let tigers = Board::empty(MIN_BOARD_SIZE).positions().collect();
        let game = Game::new(&GameConfig {
            board_size: MIN_BOARD_SIZE,
            tiger_positions: Some(tigers),
            ..GameConfig::default()
        })
        .unwrap();
        assert_eq!(game.phase(), Phase::GameOver(GameOutcome::BoardFull));
    }

    #[test]
    fn game_ends_after_last_capture() {
        let mut game = Game::new(&GameConfig {
            goat_budget: 2,
            tiger_positions: Some(vec![Position::new(0, 0)]),
            ..GameConfig::default()
        })
        .unwrap();
        game.place_goat(Position::new(0, 1)).unwrap();
        game.play_tiger_turn(&mut MinCostSelector).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingGoatPlacement);
        // The tiger is now on (0, 2)
        game.place_goat(Position::new(1, 2)).unwrap();
        assert_eq!(
            game.play_tiger_turn(&mut MinCostSelector).unwrap(),
            TigerTurn::Captured(Move::jump(Position::new(0, 2), Position::new(2, 2)).unwrap())
        );
        assert_eq!(
            game.phase(),
            Phase::GameOver(GameOutcome::PlacementBudgetExhausted)
        );
        assert_eq!(game.goats_remaining(), 0);
        assert_eq!(game.board().goat_count(), 0);
    }

    #[test]
    fn invalid_configs() {
        let too_small = GameConfig {
            board_size: 2,
            ..GameConfig::default()
        };
        assert_eq!(
            too_small.validate(),
            Err(InvalidConfig::BoardSizeOutOfRange { size: 2 })
        );
        let overlapping = GameConfig {
            tiger_positions: Some(vec![Position::new(1, 1), Position::new(1, 1)]),
            ..GameConfig::default()
        };
        assert_eq!(
            overlapping.validate(),
            Err(InvalidConfig::TigerPlacement {
                tiger_idx: 1,
                err: InvalidPlacement::Occupied {
                    pos: Position::new(1, 1),
                    occupant: Cell::Tiger
                }
            })
        );
        let no_tigers = GameConfig {
            tiger_positions: Some(vec![]),
            ..GameConfig::default()
        };
        assert_eq!(no_tigers.validate(), Err(InvalidConfig::NoTigers));
    }

    #[test]
    fn zero_budget_is_over_immediately() {
        let game = Game::new(&GameConfig {
            goat_budget: 0,
            ..GameConfig::default()
        })
        .unwrap();
        assert_eq!(
            game.phase(),
            Phase::GameOver(GameOutcome::PlacementBudgetExhausted)
        );
    }

    #[test]
    fn config_from_json() {
        let config: GameConfig = serde_json::from_str(
            r#"{ "board_size": 7, "diagonal_captures": true, "cost_policy": "mobility" }"#,
        )
        .unwrap();
        assert_eq!(config.board_size, 7);
        assert_eq!(config.goat_budget, GOAT_BUDGET);
        assert!(config.rules.diagonal_captures);
        assert_eq!(config.cost_policy, CostPolicy::Mobility);
        assert_eq!(
            config.tiger_positions(),
            vec![Position::new(0, 0), Position::new(0, 6), Position::new(6, 3)]
        );
    }
}
