use std::collections::HashMap;

use tracing::{info, warn};

use super::builder::GraphBuilder;
use super::graph::RegionGraph;
use super::render::RenderHints;
use super::selector::{RouteSelector, best_of};
use super::traits::CycleFinder;
use common::{
    error::Error,
    types::{LocationId, RawLocationRecord, ScoredRoute},
};

/// Outcome of one analysis pass.
#[derive(Debug, Clone)]
pub struct PatrolPlan {
    pub graph: RegionGraph,
    pub origin: LocationId,
    /// Number of cycles emitted by the search, duplicates included.
    pub candidates: usize,
    /// Unique cycles with their totals, in first-seen order.
    pub routes: Vec<ScoredRoute>,
    /// Recommended loop; empty when no route qualifies.
    pub best: ScoredRoute,
}

impl PatrolPlan {
    pub fn has_route(&self) -> bool {
        !self.best.is_empty()
    }

    /// Display names along the recommended loop.
    pub fn route_names(&self) -> Vec<&str> {
        self.best
            .path
            .iter()
            .filter_map(|&id| self.graph.location(id))
            .map(|l| l.name.as_str())
            .collect()
    }

    pub fn render_hints(&self) -> RenderHints {
        RenderHints::compute(&self.graph, &self.best)
    }
}

/// Runs build → search → select over a fully fetched set of records.
pub struct PatrolPlanner<F> {
    builder: GraphBuilder,
    finder: F,
    selector: RouteSelector,
    origin: LocationId,
}

impl<F> PatrolPlanner<F>
where
    F: CycleFinder,
{
    pub fn new(builder: GraphBuilder, finder: F, selector: RouteSelector, origin: LocationId) -> Self {
        PatrolPlanner {
            builder,
            finder,
            selector,
            origin,
        }
    }

    /// # Errors
    /// Returns `Error::LocationNotFound(origin)` when the origin was not
    /// fetched or was removed by the security filter.
    pub fn plan(&self, records: &HashMap<LocationId, RawLocationRecord>) -> Result<PatrolPlan, Error> {
        let graph = self.builder.build(records);
        info!(
            vertices = graph.num_nodes(),
            edges = graph.num_edges(),
            "generated graph"
        );

        let cycles = self.finder.find_cycles(&graph, self.origin)?;
        let routes = self.selector.score_all(&cycles, &graph);
        info!(
            candidates = cycles.len(),
            unique = routes.len(),
            "found unique paths"
        );

        let best = best_of(routes.iter().cloned());
        if best.is_empty() {
            warn!(origin = self.origin, "no active patrol loop found from origin");
        }

        Ok(PatrolPlan {
            graph,
            origin: self.origin,
            candidates: cycles.len(),
            routes,
            best,
        })
    }
}
