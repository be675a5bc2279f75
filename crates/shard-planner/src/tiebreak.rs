// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tie resolution among equally scored shards.
//!
//! Among the candidates, the least-occupied shards win. If several share
//! the minimum, one is drawn through a [`ChoiceSource`]. The minimum is
//! taken over the candidates only; shards outside the candidate set never
//! influence the outcome.

use crate::{AssignError, ShardId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Injectable source of the final random pick.
pub trait ChoiceSource: Send {
    /// Returns an index in `0..len`. Called only with `len >= 2`.
    fn choose(&mut self, len: usize) -> usize;
}

/// Uniform choice driven by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededChoice {
    rng: StdRng,
}

impl SeededChoice {
    /// Reproducible choices from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible choices seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl ChoiceSource for SeededChoice {
    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the first (lowest-index) tied shard.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl ChoiceSource for FirstChoice {
    fn choose(&mut self, _len: usize) -> usize {
        0
    }
}

/// Resolves a set of tied candidate shards to one shard.
pub struct TieBreaker {
    source: Box<dyn ChoiceSource>,
    balance_load: bool,
}

impl TieBreaker {
    pub fn new(source: impl ChoiceSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            balance_load: true,
        }
    }

    /// Tie-breaker backed by a seeded [`SeededChoice`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededChoice::new(seed))
    }

    /// Deterministic lowest-index tie-breaker.
    pub fn lowest_index() -> Self {
        Self::new(FirstChoice)
    }

    /// Always the lowest-index candidate, ignoring occupancy.
    ///
    /// Placement then depends on scores alone, which makes hand-traced
    /// runs easy to reproduce.
    pub fn first_candidate() -> Self {
        Self {
            balance_load: false,
            ..Self::new(FirstChoice)
        }
    }

    /// Picks the least-occupied candidate, drawing among equals.
    ///
    /// `candidates` are shard indices into `occupancy`, in ascending order.
    pub fn resolve(
        &mut self,
        candidates: &[ShardId],
        occupancy: &[usize],
    ) -> Result<ShardId, AssignError> {
        if !self.balance_load {
            return candidates.first().copied().ok_or(AssignError::NoCandidate);
        }
        let least = least_loaded(candidates, occupancy);
        match least.len() {
            0 => Err(AssignError::NoCandidate),
            1 => Ok(least[0]),
            len => Ok(least[self.source.choose(len) % len]),
        }
    }
}

impl std::fmt::Debug for TieBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieBreaker")
            .field("balance_load", &self.balance_load)
            .finish_non_exhaustive()
    }
}

/// Returns the candidates whose occupancy equals the minimum over
/// `candidates`, preserving their order.
pub fn least_loaded(candidates: &[ShardId], occupancy: &[usize]) -> Vec<ShardId> {
    let Some(min) = candidates.iter().map(|&s| occupancy[s]).min() else {
        return Vec::new();
    };
    candidates
        .iter()
        .copied()
        .filter(|&s| occupancy[s] == min)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every `len` it is asked about and answers from a script.
    struct Scripted {
        answers: Vec<usize>,
        asked: std::sync::Arc<std::sync::Mutex<Vec<usize>>>,
    }

    impl ChoiceSource for Scripted {
        fn choose(&mut self, len: usize) -> usize {
            self.asked.lock().unwrap().push(len);
            self.answers.remove(0)
        }
    }

    #[test]
    fn test_empty_candidates() {
        let mut tb = TieBreaker::lowest_index();
        assert_eq!(tb.resolve(&[], &[0, 0]), Err(AssignError::NoCandidate));
    }

    #[test]
    fn test_single_least_loaded_wins() {
        let mut tb = TieBreaker::lowest_index();
        assert_eq!(tb.resolve(&[0, 1, 2], &[3, 1, 2]), Ok(1));
    }

    #[test]
    fn test_minimum_taken_over_candidates_only() {
        // Shard 0 is empty but not a candidate; it must not hide 1 and 2.
        let mut tb = TieBreaker::lowest_index();
        assert_eq!(tb.resolve(&[1, 2], &[0, 4, 4]), Ok(1));
        assert_eq!(least_loaded(&[1, 2], &[0, 4, 4]), vec![1, 2]);
    }

    #[test]
    fn test_random_pick_only_among_tied_minimum() {
        let asked = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut tb = TieBreaker::new(Scripted {
            answers: vec![1],
            asked: asked.clone(),
        });
        // Minimum occupancy 1 shared by shards 0 and 3.
        assert_eq!(tb.resolve(&[0, 2, 3], &[1, 0, 5, 1]), Ok(3));
        assert_eq!(*asked.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_choice_source_not_consulted_without_tie() {
        let asked = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut tb = TieBreaker::new(Scripted {
            answers: vec![],
            asked: asked.clone(),
        });
        assert_eq!(tb.resolve(&[2], &[9, 9, 9]), Ok(2));
        assert!(asked.lock().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_choice_reproducible() {
        let mut a = SeededChoice::new(42);
        let mut b = SeededChoice::new(42);
        let xs: Vec<usize> = (0..32).map(|_| a.choose(5)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.choose(5)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 5));
    }

    #[test]
    fn test_seeded_choice_reaches_every_index() {
        let mut c = SeededChoice::new(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[c.choose(3)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_first_candidate_ignores_occupancy() {
        let mut tb = TieBreaker::first_candidate();
        assert_eq!(tb.resolve(&[0, 1, 2], &[2, 0, 0]), Ok(0));
        assert_eq!(tb.resolve(&[1, 2], &[3, 0, 0]), Ok(1));
        assert_eq!(tb.resolve(&[], &[3, 0, 0]), Err(AssignError::NoCandidate));
    }

    #[test]
    fn test_first_choice() {
        assert_eq!(FirstChoice.choose(4), 0);
    }
}
