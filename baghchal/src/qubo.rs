use std::collections::BTreeMap;

use crate::{CandidateMoveSet, Cost, Move};

/// Move selection as a quadratic unconstrained binary optimization problem.
///
/// There is one binary variable per candidate move, set to 1 if the move is
/// chosen. The energy of a sample `x` is
///
/// ```text
/// E(x) = Σ cost_i·x_i + P·(Σ x_i − 1)²
/// ```
///
/// where the second term penalizes choosing anything but exactly one move.
/// Using `x_i² = x_i`, this expands into the linear coefficients
/// `cost_i − P`, a coefficient of `2P` for every pair of variables, and the
/// constant `P`. With `P = 2·Σ|cost_i| + 1`, every sample that is not one-hot
/// has a higher energy than every one-hot sample, so the ground states are
/// exactly the cheapest moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Qubo {
    /// The move belonging to each variable, in [`Move`] order.
    variables: Vec<Move>,
    linear: Vec<f64>,
    /// Keys are `(i, j)` with `i < j`.
    quadratic: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl Qubo {
    pub fn from_candidates(candidates: &CandidateMoveSet) -> Self {
        let penalty = Self::one_hot_penalty(candidates.iter().map(|(_, cost)| cost));
        let (variables, linear): (Vec<Move>, Vec<f64>) = candidates
            .iter()
            .map(|(mv, cost)| (mv, f64::from(cost) - penalty))
            .unzip();
        let num_variables = variables.len();
        let mut quadratic = BTreeMap::new();
        for i in 0..num_variables {
            for j in (i + 1)..num_variables {
                quadratic.insert((i, j), 2.0 * penalty);
            }
        }
        Self {
            variables,
            linear,
            quadratic,
            offset: penalty,
        }
    }

    fn one_hot_penalty(costs: impl Iterator<Item = Cost>) -> f64 {
        let total: f64 = costs.map(|cost| f64::from(cost).abs()).sum();
        2.0 * total + 1.0
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[Move] {
        &self.variables
    }

    pub fn linear(&self) -> &[f64] {
        &self.linear
    }

    pub fn quadratic(&self) -> &BTreeMap<(usize, usize), f64> {
        &self.quadratic
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The coefficient coupling variables `i` and `j`, in either order.
    pub fn coupling(&self, i: usize, j: usize) -> f64 {
        let key = if i < j { (i, j) } else { (j, i) };
        self.quadratic.get(&key).copied().unwrap_or(0.0)
    }

    /// Panics if the sample does not have one entry per variable.
    pub fn energy(&self, sample: &[bool]) -> f64 {
        assert_eq!(sample.len(), self.num_variables());
        let linear: f64 = self
            .linear
            .iter()
            .zip(sample)
            .filter(|&(_, &x)| x)
            .map(|(coeff, _)| coeff)
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|&(&(i, j), _)| sample[i] && sample[j])
            .map(|(_, coeff)| coeff)
            .sum();
        self.offset + linear + quadratic
    }

    /// How much the energy changes when variable `idx` of `sample` is flipped.
    pub fn flip_delta(&self, sample: &[bool], idx: usize) -> f64 {
        let field: f64 = self.linear[idx]
            + (0..self.num_variables())
                .filter(|&other| other != idx && sample[other])
                .map(|other| self.coupling(idx, other))
                .sum::<f64>();
        if sample[idx] {
            -field
        } else {
            field
        }
    }

    /// The chosen move, if exactly one variable is set.
    pub fn decode(&self, sample: &[bool]) -> Option<Move> {
        let mut chosen = sample
            .iter()
            .zip(&self.variables)
            .filter(|&(&x, _)| x)
            .map(|(_, &mv)| mv);
        let first = chosen.next()?;
        if chosen.next().is_some() {
            return None;
        }
        Some(first)
    }
}
