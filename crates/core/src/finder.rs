use tracing::debug;

use super::dfs::{DfsEvent, depth_first_walk};
use super::graph::RegionGraph;
use super::traits::CycleFinder;
use common::{
    error::Error,
    types::{Cycle, LocationId},
};

/// Hand-maintained path stack folded over a depth-first walk.
///
/// The stack is not a snapshot of the DFS call stack. It is updated from
/// three kinds of events:
/// - `Discover(u)`: push `u` and move the cursor to it.
/// - `Examine { source, .. }` with `source != cursor`: the walk has returned
///   to another frame. The cursor moves to `source`; if `source` is on the
///   stack everything from `source` onwards is dropped, otherwise `source` is
///   pushed.
/// - `BackEdge`: the current stack is recorded verbatim as a cycle.
///
/// Because the truncation also removes `source` itself, cycles recorded after
/// a return to the origin's frame do not start with the origin; see
/// [`normalize_cycles`].
#[derive(Debug, Default)]
pub struct PathStack {
    path: Vec<usize>,
    cursor: Option<usize>,
    emitted: Vec<Vec<usize>>,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: DfsEvent) {
        match event {
            DfsEvent::Discover(u) => {
                self.path.push(u);
                self.cursor = Some(u);
            }
            DfsEvent::Examine { source, .. } => {
                if self.cursor != Some(source) {
                    self.cursor = Some(source);
                    match self.path.iter().position(|&v| v == source) {
                        Some(pos) => self.path.truncate(pos),
                        None => self.path.push(source),
                    }
                }
            }
            DfsEvent::BackEdge { .. } => self.emitted.push(self.path.clone()),
        }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn into_emitted(self) -> Vec<Vec<usize>> {
        self.emitted
    }
}

/// Drops empty cycles and puts `origin` in front of every cycle that does not
/// already start with it.
pub fn normalize_cycles(cycles: Vec<Cycle>, origin: LocationId) -> Vec<Cycle> {
    cycles
        .into_iter()
        .filter(|cycle| !cycle.is_empty())
        .map(|mut cycle| {
            if cycle[0] != origin {
                cycle.insert(0, origin);
            }
            cycle
        })
        .collect()
}

/// Cycle search driven by a [`PathStack`] over a depth-first walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathStackFinder;

impl CycleFinder for PathStackFinder {
    fn find_cycles(&self, graph: &RegionGraph, origin: LocationId) -> Result<Vec<Cycle>, Error> {
        let start = graph
            .index_of(origin)
            .ok_or(Error::LocationNotFound(origin))?;

        let mut state = PathStack::new();
        depth_first_walk(graph, start, |event| state.apply(event));

        let emitted: Vec<Cycle> = state
            .into_emitted()
            .into_iter()
            .map(|path| path.into_iter().map(|idx| graph.id_at(idx)).collect())
            .collect();

        let cycles = normalize_cycles(emitted, origin);
        debug!(origin, cycles = cycles.len(), "cycle search finished");

        Ok(cycles)
    }
}
