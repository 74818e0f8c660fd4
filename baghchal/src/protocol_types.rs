use serde::{Deserialize, Serialize};

use crate::{CandidateMoveSet, Cost, Move};

/// Request for an oracle process to do something.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the oracle's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { board_size: i8 },
    /// Request to pick one of the candidate tiger moves.
    ///
    /// The response should be a [`SelectMoveResponse`] with the same `turn`.
    SelectMove {
        /// Increases with every request of this kind, so that answers to
        /// requests that timed out can be told apart.
        turn: u32,
        /// Never empty, and sorted by move.
        candidates: Vec<Candidate>,
    },
    /// The oracle should shut down.
    Bye,
}

/// Dummy struct for use in oracle communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Okay();

/// One entry of a [`CandidateMoveSet`] on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "move")]
    pub mv: Move,
    pub cost: Cost,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectMoveResponse {
    pub turn: u32,
    /// Should only be `None` if the oracle is unable to choose.
    pub selection: Option<Move>,
}

impl CandidateMoveSet {
    pub fn to_candidates(&self) -> Vec<Candidate> {
        self.iter().map(|(mv, cost)| Candidate { mv, cost }).collect()
    }
}

impl FromIterator<Candidate> for CandidateMoveSet {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        iter.into_iter()
            .map(|Candidate { mv, cost }| (mv, cost))
            .collect()
    }
}
