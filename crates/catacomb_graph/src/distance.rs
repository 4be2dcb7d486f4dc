//! # Path Distance Propagation
//!
//! Computes, for every committed chamber, the minimum number of resolved
//! portal hops to the occupied chamber.
//!
//! ## Algorithm
//!
//! Round-based relaxation over the resolved-portal graph:
//!
//! ```text
//! reset every score to unknown
//! repeat up to max_rounds:
//!     occupied := 0 if unknown
//!     for each unknown chamber:
//!         score := 1 + min(score of neighbours known at round start)
//!     stop when every chamber is scored (or nothing changed)
//! ```
//!
//! Round `k` scores exactly the chambers `k` hops away. Chambers further than
//! the bound, or behind unresolved portals, keep an unknown score. Callers
//! must read unknown as "very far", never as zero.

use crate::chamber::ChamberId;
use crate::config::DEFAULT_MAX_PROPAGATION_ROUNDS;
use crate::error::{GraphError, GraphResult};
use crate::registry::ChamberRegistry;

/// Outcome of one propagation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Rounds actually run.
    pub rounds: u32,
    /// Chambers left with an unknown score.
    pub unscored: usize,
    /// True if the round bound ran out before a fixpoint was reached.
    pub exhausted: bool,
}

/// Refreshes chamber path scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathDistancePropagator {
    max_rounds: u32,
}

impl Default for PathDistancePropagator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PROPAGATION_ROUNDS)
    }
}

impl PathDistancePropagator {
    /// Creates a propagator with the given round bound.
    #[inline]
    #[must_use]
    pub const fn new(max_rounds: u32) -> Self {
        Self { max_rounds }
    }

    /// The round bound.
    #[inline]
    #[must_use]
    pub const fn max_rounds(self) -> u32 {
        self.max_rounds
    }

    /// Recomputes every chamber's score relative to `occupied`.
    ///
    /// Idempotent: running it twice on an unchanged registry gives the same
    /// scores.
    ///
    /// # Errors
    ///
    /// Returns `UnknownChamber` if `occupied` is not committed. Scores are
    /// untouched in that case.
    pub fn propagate(
        self,
        registry: &mut ChamberRegistry,
        occupied: ChamberId,
    ) -> GraphResult<PropagationReport> {
        if registry.get(occupied).is_none() {
            return Err(GraphError::UnknownChamber(occupied));
        }

        let adjacency = Self::adjacency(registry);
        let mut scores: Vec<Option<u32>> = vec![None; adjacency.len()];
        let mut report = PropagationReport::default();

        for _ in 0..self.max_rounds {
            report.rounds += 1;
            let origin = &mut scores[occupied.index()];
            if origin.is_none() {
                *origin = Some(0);
            }

            // Only scores known when the round starts may seed new ones
            let known = scores.clone();
            let mut changed = false;
            for (chamber, score) in scores.iter_mut().enumerate() {
                if score.is_some() {
                    continue;
                }
                if let Some(best) = adjacency[chamber].iter().filter_map(|&n| known[n]).min() {
                    *score = Some(best + 1);
                    changed = true;
                }
            }

            if !changed || scores.iter().all(Option::is_some) {
                break;
            }
        }

        // Cut short only if another round would still score something
        report.exhausted = scores.iter().enumerate().any(|(chamber, score)| {
            score.is_none() && adjacency[chamber].iter().any(|&n| scores[n].is_some())
        });

        for (chamber, score) in registry.iter_mut().zip(&scores) {
            chamber.path_score = *score;
        }

        report.unscored = scores.iter().filter(|s| s.is_none()).count();
        if report.exhausted {
            tracing::warn!(
                rounds = report.rounds,
                unscored = report.unscored,
                "path propagation hit its round bound"
            );
        }
        Ok(report)
    }

    /// Undirected adjacency over resolved portals, indexed by chamber.
    fn adjacency(registry: &ChamberRegistry) -> Vec<Vec<usize>> {
        let count = registry.len();
        let mut adjacency = vec![Vec::new(); count];
        for chamber in registry.iter() {
            let from = chamber.id().index();
            for to in chamber.neighbours().map(ChamberId::index) {
                if to < count {
                    adjacency[from].push(to);
                    adjacency[to].push(from);
                }
            }
        }
        adjacency
    }
}
