use rand::Rng;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use tracing::debug;

use crate::types::{Candidate, Position};

/// How a computer player picks among the legal moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Any legal move with equal probability.
    Uniform,
    /// The move flipping the most pieces; first in row-major order on ties.
    Greedy,
    /// Sample with weight `flips^skill`. `skill = 0` is uniform, larger
    /// values lean towards greedy.
    Weighted { skill: f64 },
}

impl Policy {
    /// Picks one of `candidates`, or `None` when there are none.
    pub fn choose<R: Rng + ?Sized>(&self, candidates: &[Candidate], rng: &mut R) -> Option<Position> {
        if candidates.is_empty() {
            return None;
        }

        match *self {
            Self::Uniform => Some(candidates[rng.random_range(0..candidates.len())].position),
            Self::Greedy => most_flips(candidates),
            Self::Weighted { skill } => {
                let weights: Vec<f64> = candidates
                    .iter()
                    .map(|c| (c.flips as f64).powf(skill))
                    .collect();
                let total: f64 = weights.iter().sum();
                let dist = (total.is_finite() && total > 0.0)
                    .then(|| WeightedIndex::new(&weights).ok())
                    .flatten();
                match dist {
                    Some(dist) => Some(candidates[dist.sample(rng)].position),
                    // Weights overflowed or underflowed: take the limit of the distribution.
                    None if skill > 0.0 => most_flips(candidates),
                    None => fewest_flips(candidates),
                }
            }
        }
    }
}

/// Chooses a move for a computer-controlled player.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, candidates: &[Candidate]) -> Option<Position>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, candidates: &[Candidate]) -> Option<Position> {
        candidates.first().map(|c| c.position)
    }
}

/// A [`Policy`] driven by its own seeded generator.
#[derive(Debug, Clone)]
pub struct PolicySelector {
    policy: Policy,
    rng: StdRng,
}

impl PolicySelector {
    pub fn new(policy: Policy, seed: u64) -> Self {
        Self {
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }
}

impl MoveSelector for PolicySelector {
    fn select_move(&mut self, candidates: &[Candidate]) -> Option<Position> {
        let choice = self.policy.choose(candidates, &mut self.rng);
        debug!(policy = ?self.policy, candidates = candidates.len(), ?choice, "selected move");
        choice
    }
}

fn most_flips(candidates: &[Candidate]) -> Option<Position> {
    candidates
        .iter()
        .reduce(|best, c| if c.flips > best.flips { c } else { best })
        .map(|c| c.position)
}

fn fewest_flips(candidates: &[Candidate]) -> Option<Position> {
    candidates
        .iter()
        .reduce(|best, c| if c.flips < best.flips { c } else { best })
        .map(|c| c.position)
}
