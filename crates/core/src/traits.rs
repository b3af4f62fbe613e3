use super::graph::RegionGraph;
use common::{
    error::Error,
    types::{Cycle, LocationId},
};

/// Trait for cycle searches run from a fixed origin.
pub trait CycleFinder {
    /// Enumerates candidate patrol loops reachable from `origin`.
    ///
    /// Returns every emitted cycle (duplicates included), each starting at
    /// `origin`, or `Err(Error::LocationNotFound(origin))` if `origin` is
    /// not a vertex of `graph`.
    fn find_cycles(&self, graph: &RegionGraph, origin: LocationId) -> Result<Vec<Cycle>, Error>;
}
