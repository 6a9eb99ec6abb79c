use rand::{rngs::OsRng, seq::IteratorRandom, SeedableRng};
use rand_xorshift::XorShiftRng;
use thiserror::Error;

use crate::{node::Node, Policy, MCTS};

/// Upper Confidence Bound applied to trees:
/// `mean + c * sqrt(ln(parent_visits) / child_visits)`.
#[derive(Debug, Clone)]
pub struct UCTPolicy(pub f64);

impl Default for UCTPolicy {
    fn default() -> Self {
        Self(std::f64::consts::SQRT_2)
    }
}

impl UCTPolicy {
    #[allow(clippy::cast_precision_loss)]
    pub fn ucb(&self, parent_visits: u64, child_visits: u64, child_score: f64) -> f64 {
        if child_visits == 0 {
            return f64::INFINITY;
        }
        let child_visits = child_visits as f64;
        let mean_action_value = child_score / child_visits;
        let explore_term = if parent_visits == 0 {
            0.0
        } else {
            ((parent_visits as f64).ln() / child_visits).sqrt()
        };
        mean_action_value + self.0 * explore_term
    }
}

impl<M: MCTS<Select = Self>> Policy<M> for UCTPolicy {
    fn score(&self, parent_visits: u64, child: &Node<M>) -> f64 {
        self.ucb(parent_visits, child.visits(), child.score())
    }
}

#[derive(Debug, Error)]
#[error("random number source failed: {0}")]
pub struct RngError(#[from] rand::Error);

/// Randomness used by simulations.
#[derive(Clone)]
pub struct PlayoutRng {
    rng: XorShiftRng,
}

impl PlayoutRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        let rng = SeedableRng::seed_from_u64(seed);
        Self { rng }
    }

    pub fn from_entropy() -> Result<Self, RngError> {
        let rng = XorShiftRng::from_rng(OsRng)?;
        Ok(Self { rng })
    }

    /// Uniformly random element, `None` when `elts` is empty.
    pub fn pick<T, Iter>(&mut self, elts: Iter) -> Option<T>
    where
        Iter: IntoIterator<Item = T>,
    {
        elts.into_iter().choose(&mut self.rng)
    }
}

impl Default for PlayoutRng {
    fn default() -> Self {
        Self::seeded(1337)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_is_unbounded() {
        let policy = UCTPolicy::default();
        assert_eq!(policy.ucb(10, 0, 0.0), f64::INFINITY);
        assert!(policy.ucb(10, 1, 1.0).is_finite());
    }

    #[test]
    fn exploration_shrinks_with_child_visits() {
        let policy = UCTPolicy::default();
        // Same mean, more visits.
        let few = policy.ucb(100, 4, 2.0);
        let many = policy.ucb(100, 16, 8.0);
        assert!(few > many);
    }

    #[test]
    fn exploration_grows_with_parent_visits() {
        let policy = UCTPolicy::default();
        assert!(policy.ucb(1_000, 10, 5.0) > policy.ucb(100, 10, 5.0));
        assert_eq!(policy.ucb(1, 10, 5.0), 0.5);
    }

    #[test]
    fn same_seed_same_picks() {
        let mut a = PlayoutRng::seeded(42);
        let mut b = PlayoutRng::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.pick(0..9), b.pick(0..9));
        }
        assert_eq!(a.pick(std::iter::empty::<u8>()), None);
    }
}
