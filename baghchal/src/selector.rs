use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::{CandidateMoveSet, Move, SelectionError};

/// Something that picks one tiger move out of a set of candidates.
///
/// Implementations can be anything from an exhaustive search to a call into
/// an external optimizer. They should be called through [`select_move()`],
/// which guarantees that only candidates come out.
pub trait MoveSelector {
    /// Picks one of the candidates.
    ///
    /// Only called with a non-empty candidate set.
    fn select(&mut self, candidates: &CandidateMoveSet) -> Result<Option<Move>, SelectionError>;
}

impl<S: MoveSelector + ?Sized> MoveSelector for Box<S> {
    fn select(&mut self, candidates: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
        (**self).select(candidates)
    }
}

impl<S: MoveSelector + ?Sized> MoveSelector for &mut S {
    fn select(&mut self, candidates: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
        (**self).select(candidates)
    }
}

/// Asks `selector` for a move.
///
/// `Ok(None)` means there are no candidates, i.e. the tigers cannot move. In
/// that case the selector is not consulted at all. A returned move is always
/// one of the candidates; anything else the selector comes up with is turned
/// into an error.
pub fn select_move<S: MoveSelector + ?Sized>(
    selector: &mut S,
    candidates: &CandidateMoveSet,
) -> Result<Option<Move>, SelectionError> {
    if candidates.is_empty() {
        return Ok(None);
    }
    match selector.select(candidates)? {
        Some(mv) if candidates.contains(&mv) => Ok(Some(mv)),
        Some(mv) => Err(SelectionError::NotACandidate(mv)),
        None => Err(SelectionError::NoSelection),
    }
}

/// Exhaustive search for the cheapest candidate.
///
/// Ties are broken by [`Move`] order, i.e. by origin, then by destination.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinCostSelector;

impl MoveSelector for MinCostSelector {
    fn select(&mut self, candidates: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
        Ok(candidates.min_cost_move())
    }
}

/// Picks any candidate, ignoring costs.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl MoveSelector for RandomSelector {
    fn select(&mut self, candidates: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
        Ok(candidates.moves().choose(&mut self.rng))
    }
}

/// Falls back to [`MinCostSelector`] when the wrapped selector times out.
///
/// Other failures are passed on unchanged.
#[derive(Clone, Debug)]
pub struct WithFallback<S> {
    pub primary: S,
    fallbacks_used: usize,
}

impl<S> WithFallback<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            fallbacks_used: 0,
        }
    }

    /// How often the fallback had to step in so far.
    pub fn fallbacks_used(&self) -> usize {
        self.fallbacks_used
    }
}

impl<S: MoveSelector> MoveSelector for WithFallback<S> {
    fn select(&mut self, candidates: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
        match select_move(&mut self.primary, candidates) {
            Err(SelectionError::Timeout) => {
                self.fallbacks_used += 1;
                MinCostSelector.select(candidates)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    /// Replays canned answers.
    struct Scripted(Vec<Result<Option<Move>, SelectionError>>);

    impl MoveSelector for Scripted {
        fn select(&mut self, _: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
            self.0.remove(0)
        }
    }

    struct MustNotBeCalled;

    impl MoveSelector for MustNotBeCalled {
        fn select(&mut self, _: &CandidateMoveSet) -> Result<Option<Move>, SelectionError> {
            panic!("Selector consulted for an empty candidate set")
        }
    }

    fn jump(from: (i8, i8), to: (i8, i8)) -> Move {
        Move::jump(Position::new(from.0, from.1), Position::new(to.0, to.1)).unwrap()
    }

    fn sample_candidates() -> CandidateMoveSet {
        CandidateMoveSet::from_iter([
            (jump((2, 2), (0, 2)), -1),
            (jump((0, 0), (2, 0)), -1),
            (jump((0, 0), (0, 2)), -1),
            (jump((4, 4), (4, 2)), 3),
        ])
    }

    #[test]
    fn empty_set_selects_nothing() {
        let empty = CandidateMoveSet::new();
        assert_eq!(select_move(&mut MustNotBeCalled, &empty), Ok(None));
        assert_eq!(select_move(&mut MinCostSelector, &empty), Ok(None));
        assert_eq!(select_move(&mut RandomSelector::from_seed(0), &empty), Ok(None));
    }

    #[test]
    fn min_cost_breaks_ties_lexicographically() {
        let candidates = sample_candidates();
        assert_eq!(
            select_move(&mut MinCostSelector, &candidates),
            Ok(Some(jump((0, 0), (0, 2))))
        );
    }

    #[test]
    fn fabricated_moves_are_rejected() {
        let candidates = sample_candidates();
        let bogus = jump((1, 1), (1, 3));
        let mut selector = Scripted(vec![Ok(Some(bogus)), Ok(None)]);
        assert_eq!(
            select_move(&mut selector, &candidates),
            Err(SelectionError::NotACandidate(bogus))
        );
        assert_eq!(
            select_move(&mut selector, &candidates),
            Err(SelectionError::NoSelection)
        );
    }

    #[test]
    fn random_selector_only_returns_candidates() {
        let candidates = sample_candidates();
        let mut selector = RandomSelector::from_seed(42);
        for _ in 0..100 {
            let mv = select_move(&mut selector, &candidates).unwrap().unwrap();
            assert!(candidates.contains(&mv));
        }
    }

    #[test]
    fn fallback_on_timeout_only() {
        let candidates = sample_candidates();
        let chosen = jump((4, 4), (4, 2));
        let mut selector = WithFallback::new(Scripted(vec![
            Err(SelectionError::Timeout),
            Ok(Some(chosen)),
            Err(SelectionError::Unavailable(String::from("crashed"))),
        ]));
        assert_eq!(
            select_move(&mut selector, &candidates),
            Ok(Some(jump((0, 0), (0, 2))))
        );
        assert_eq!(select_move(&mut selector, &candidates), Ok(Some(chosen)));
        assert_eq!(
            select_move(&mut selector, &candidates),
            Err(SelectionError::Unavailable(String::from("crashed")))
        );
        assert_eq!(selector.fallbacks_used(), 1);
    }

    #[test]
    fn boxed_selectors() {
        let candidates = sample_candidates();
        let mut selector: Box<dyn MoveSelector> = Box::new(MinCostSelector);
        assert_eq!(
            select_move(&mut selector, &candidates),
            Ok(Some(jump((0, 0), (0, 2))))
        );
    }
}
