use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{is_legal_capture, Board, Position, Rules};

/// A tiger capture: the tiger jumps from `origin` to `destination`, removing
/// the goat on `captured`.
///
/// Moves are ordered by origin first, then destination.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    pub origin: Position,
    pub destination: Position,
    /// Always the midpoint of `origin` and `destination`.
    pub captured: Position,
}

impl Move {
    /// Creates the jump from `origin` to `destination`.
    ///
    /// Returns `None` if there is no cell exactly in between the two.
    /// Whether the jump is legal on some board is not checked.
    pub fn jump(origin: Position, destination: Position) -> Option<Self> {
        Some(Self {
            origin,
            destination,
            captured: origin.midpoint(destination)?,
        })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} capturing {}",
            self.origin, self.destination, self.captured
        )
    }
}

/// The selection weight of a move. Lower is more preferred.
pub type Cost = i32;

/// Scores a legal capture. Must be deterministic in its inputs.
pub trait CostFunction {
    fn cost(&self, board: &Board, rules: &Rules, mv: &Move) -> Cost;
}

/// Every legal capture is equally good.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uniform;

impl Uniform {
    pub const COST: Cost = -1;
}

impl CostFunction for Uniform {
    fn cost(&self, _board: &Board, _rules: &Rules, _mv: &Move) -> Cost {
        Self::COST
    }
}

/// Prefers captures after which the same tiger can capture again, and
/// avoids landing on the edge of the board, where a tiger has fewer jumps.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mobility;

impl Mobility {
    pub const BASE_COST: Cost = -1;
    pub const FOLLOW_UP_BONUS: Cost = 2;
    pub const EDGE_PENALTY: Cost = 1;
}

impl CostFunction for Mobility {
    fn cost(&self, board: &Board, rules: &Rules, mv: &Move) -> Cost {
        let Ok(after) = board.capture(rules, mv) else {
            return 0;
        };
        let follow_ups = rules
            .jump_offsets()
            .filter_map(|(d_row, d_col)| mv.destination.offset(d_row, d_col))
            .filter(|&dest| is_legal_capture(&after, rules, mv.destination, dest))
            .count() as Cost;
        let edge_penalty = if after.is_on_edge(mv.destination) {
            Self::EDGE_PENALTY
        } else {
            0
        };
        Self::BASE_COST - Self::FOLLOW_UP_BONUS * follow_ups + edge_penalty
    }
}

/// The selectable cost functions, e.g. for a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPolicy {
    #[default]
    Uniform,
    Mobility,
}

impl CostFunction for CostPolicy {
    fn cost(&self, board: &Board, rules: &Rules, mv: &Move) -> Cost {
        match self {
            CostPolicy::Uniform => Uniform.cost(board, rules, mv),
            CostPolicy::Mobility => Mobility.cost(board, rules, mv),
        }
    }
}

/// All legal captures of one tiger turn, each with its cost.
///
/// Iterates in [`Move`] order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateMoveSet {
    moves: BTreeMap<Move, Cost>,
}

impl CandidateMoveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mv: Move, cost: Cost) {
        self.moves.insert(mv, cost);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains_key(mv)
    }

    pub fn cost(&self, mv: &Move) -> Option<Cost> {
        self.moves.get(mv).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Move, Cost)> + '_ {
        self.moves.iter().map(|(&mv, &cost)| (mv, cost))
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.keys().copied()
    }

    /// The cheapest move; among equally cheap moves, the first in [`Move`] order.
    pub fn min_cost_move(&self) -> Option<Move> {
        // min_by_key returns the first minimum, and the map is sorted by move
        self.iter().min_by_key(|&(_, cost)| cost).map(|(mv, _)| mv)
    }
}

impl FromIterator<(Move, Cost)> for CandidateMoveSet {
    fn from_iter<T: IntoIterator<Item = (Move, Cost)>>(iter: T) -> Self {
        Self {
            moves: BTreeMap::from_iter(iter),
        }
    }
}

/// Enumerates every legal capture of every tiger on the board.
///
/// An empty result means the tigers cannot capture anything.
pub fn build_candidate_moves<C>(board: &Board, rules: &Rules, cost_fn: &C) -> CandidateMoveSet
where
    C: CostFunction + ?Sized,
{
    let mut candidates = CandidateMoveSet::new();
    for tiger in board.tigers() {
        for (d_row, d_col) in rules.jump_offsets() {
            let Some(dest) = tiger.offset(d_row, d_col) else {
                continue;
            };
            if !is_legal_capture(board, rules, tiger, dest) {
                continue;
            }
            if let Some(mv) = Move::jump(tiger, dest) {
                candidates.insert(mv, cost_fn.cost(board, rules, &mv));
            }
        }
    }
    candidates
}
