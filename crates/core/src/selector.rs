use std::collections::HashSet;

use tracing::debug;

use super::graph::RegionGraph;
use common::types::{Cycle, LocationId, ScoredRoute};

/// How candidate cycles are collapsed before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupMode {
    /// Two cycles are the same only if they are identical sequences.
    /// Rotations and reversals of one loop count as distinct routes.
    #[default]
    Exact,
    /// Cycles are compared by [`canonical_form`], so rotations and reversals
    /// of one loop collapse into the first one seen.
    Canonical,
}

/// Smallest sequence, lexicographically, among all rotations of `cycle` and of
/// its reversal.
pub fn canonical_form(cycle: &[LocationId]) -> Cycle {
    let n = cycle.len();
    let reversed: Vec<LocationId> = cycle.iter().rev().copied().collect();

    let mut best: Cycle = cycle.to_vec();
    for seq in [cycle, reversed.as_slice()] {
        for shift in 0..n {
            let rotated: Cycle = seq[shift..].iter().chain(&seq[..shift]).copied().collect();
            if rotated < best {
                best = rotated;
            }
        }
    }
    best
}

/// Collapses duplicate cycles, keeping the first occurrence of each and the
/// order in which they were first seen.
pub fn dedup_cycles(cycles: &[Cycle], mode: DedupMode) -> Vec<Cycle> {
    let mut seen: HashSet<Cycle> = HashSet::with_capacity(cycles.len());

    cycles
        .iter()
        .filter(|cycle| {
            let key = match mode {
                DedupMode::Exact => (*cycle).clone(),
                DedupMode::Canonical => canonical_form(cycle),
            };
            seen.insert(key)
        })
        .cloned()
        .collect()
}

/// Sums ship kills and jumps over the vertices of `cycle`.
///
/// Ids that are not vertices of `graph` contribute nothing.
pub fn score(cycle: &[LocationId], graph: &RegionGraph) -> (u64, u64) {
    cycle
        .iter()
        .filter_map(|&id| graph.location(id))
        .fold((0u64, 0u64), |(kills, jumps), location| {
            (
                kills + u64::from(location.ship_kills),
                jumps + u64::from(location.jumps),
            )
        })
}

/// Ranks candidate cycles by accumulated ship kills.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteSelector {
    mode: DedupMode,
}

impl RouteSelector {
    pub fn new(mode: DedupMode) -> Self {
        RouteSelector { mode }
    }

    pub fn mode(&self) -> DedupMode {
        self.mode
    }

    /// Deduplicates `cycles` and scores each unique cycle, in first-seen order.
    pub fn score_all(&self, cycles: &[Cycle], graph: &RegionGraph) -> Vec<ScoredRoute> {
        let unique = dedup_cycles(cycles, self.mode);
        debug!(
            candidates = cycles.len(),
            unique = unique.len(),
            mode = ?self.mode,
            "deduplicated cycles"
        );

        unique
            .into_iter()
            .map(|path| {
                let (total_kills, total_jumps) = score(&path, graph);
                ScoredRoute {
                    path,
                    total_kills,
                    total_jumps,
                }
            })
            .collect()
    }

    /// Returns the unique cycle with the strictly greatest kill total.
    ///
    /// Ties keep the cycle seen first. The search starts from an empty route
    /// with zero totals, so when `cycles` is empty, or no cycle has any kills,
    /// the empty route is returned.
    pub fn select_best(&self, cycles: &[Cycle], graph: &RegionGraph) -> ScoredRoute {
        best_of(self.score_all(cycles, graph))
    }
}

/// Picks the route with the strictly greatest kill total out of `routes`.
pub fn best_of(routes: impl IntoIterator<Item = ScoredRoute>) -> ScoredRoute {
    routes
        .into_iter()
        .fold(ScoredRoute::default(), |best, route| {
            if route.total_kills > best.total_kills {
                route
            } else {
                best
            }
        })
}
