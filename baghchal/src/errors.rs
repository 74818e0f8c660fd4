use crate::{Cell, Move, Position};

/// The error type for placing a piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidPlacement {
    OutOfBounds { pos: Position },
    Occupied { pos: Position, occupant: Cell },
}

impl std::error::Error for InvalidPlacement {}

impl std::fmt::Display for InvalidPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPlacement::OutOfBounds { pos } => {
                write!(f, "Position {} is outside of the board", pos)
            }
            InvalidPlacement::Occupied { pos, occupant } => {
                write!(f, "Position {} is already occupied by a {}", pos, occupant.name())
            }
        }
    }
}

/// The error type for [`Board::cell_at()`](crate::Board::cell_at).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    pub pos: Position,
    pub size: i8,
}

impl std::error::Error for OutOfBounds {}

impl std::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Position {} is outside of the {}x{} board",
            self.pos, self.size, self.size
        )
    }
}

/// The error type for [`Board::capture()`](crate::Board::capture).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllegalCapture {
    pub mv: Move,
}

impl std::error::Error for IllegalCapture {}

impl std::fmt::Display for IllegalCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The capture {} is not legal on this board", self.mv)
    }
}

/// Why a [`MoveSelector`](crate::MoveSelector) could not pick a move.
///
/// This is distinct from the selector legitimately returning no move because
/// there are no candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The selector did not answer in time.
    Timeout,
    /// The selector could not be reached, e.g. because its process died.
    Unavailable(String),
    /// The selector answered with a move that was not among the candidates.
    NotACandidate(Move),
    /// The selector answered with no move although there were candidates.
    NoSelection,
}

impl std::error::Error for SelectionError {}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::Timeout => write!(f, "Move selection timed out"),
            SelectionError::Unavailable(reason) => {
                write!(f, "Move selector is unavailable: {}", reason)
            }
            SelectionError::NotACandidate(mv) => {
                write!(f, "Move selector picked {}, which is not a candidate", mv)
            }
            SelectionError::NoSelection => {
                write!(f, "Move selector picked nothing despite legal captures existing")
            }
        }
    }
}

/// The error type for [`Game::place_goat()`](crate::Game::place_goat).
///
/// Only `InvalidPlacement` is worth asking the goat player again for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoatTurnError {
    NotGoatsTurn,
    InvalidPlacement(InvalidPlacement),
}

impl std::error::Error for GoatTurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GoatTurnError::NotGoatsTurn => None,
            GoatTurnError::InvalidPlacement(err) => Some(err),
        }
    }
}

impl std::fmt::Display for GoatTurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoatTurnError::NotGoatsTurn => write!(f, "It is not the goats' turn"),
            GoatTurnError::InvalidPlacement(err) => write!(f, "{}", err),
        }
    }
}

impl From<InvalidPlacement> for GoatTurnError {
    fn from(err: InvalidPlacement) -> Self {
        GoatTurnError::InvalidPlacement(err)
    }
}

/// The error type for [`Game::play_tiger_turn()`](crate::Game::play_tiger_turn).
#[derive(Debug)]
pub enum TigerTurnError {
    NotTigersTurn,
    Selection(SelectionError),
    IllegalCapture(IllegalCapture),
}

impl std::error::Error for TigerTurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TigerTurnError::NotTigersTurn => None,
            TigerTurnError::Selection(err) => Some(err),
            TigerTurnError::IllegalCapture(err) => Some(err),
        }
    }
}

impl std::fmt::Display for TigerTurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TigerTurnError::NotTigersTurn => write!(f, "It is not the tigers' turn"),
            TigerTurnError::Selection(_) => write!(f, "Could not select a tiger move"),
            TigerTurnError::IllegalCapture(_) => write!(f, "Could not apply the tiger move"),
        }
    }
}

impl From<SelectionError> for TigerTurnError {
    fn from(err: SelectionError) -> Self {
        TigerTurnError::Selection(err)
    }
}

impl From<IllegalCapture> for TigerTurnError {
    fn from(err: IllegalCapture) -> Self {
        TigerTurnError::IllegalCapture(err)
    }
}

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate).
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidConfig {
    BoardSizeOutOfRange { size: i8 },
    NoTigers,
    TigerPlacement { tiger_idx: usize, err: InvalidPlacement },
}

impl std::error::Error for InvalidConfig {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidConfig::TigerPlacement { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfig::BoardSizeOutOfRange { size } => write!(
                f,
                "Board size {} is not in the supported range {}..={}",
                size,
                crate::MIN_BOARD_SIZE,
                crate::MAX_BOARD_SIZE
            ),
            InvalidConfig::NoTigers => write!(f, "At least one tiger must be placed"),
            InvalidConfig::TigerPlacement { tiger_idx, .. } => {
                write!(f, "Tiger number {} cannot be placed", tiger_idx + 1)
            }
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Position`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionFromStrErr {
    TooFewCoordinates,
    TooManyCoordinates,
    InvalidCoordinate(String),
}

impl std::error::Error for PositionFromStrErr {}

impl std::fmt::Display for PositionFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionFromStrErr::TooFewCoordinates => {
                write!(f, "Expected a row and a column, e.g. \"2 3\"")
            }
            PositionFromStrErr::TooManyCoordinates => {
                write!(f, "Expected only a row and a column, e.g. \"2 3\"")
            }
            PositionFromStrErr::InvalidCoordinate(coord) => {
                write!(f, "'{}' is not a valid coordinate", coord)
            }
        }
    }
}
