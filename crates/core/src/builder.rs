use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use super::graph::RegionGraph;
use common::types::{EdgeKey, Location, LocationId, RawLocationRecord, edge_key};

/// Locations at or above this security rating are considered safe space and
/// are left out of the patrol graph.
pub const DEFAULT_SECURITY_THRESHOLD: f64 = 0.45;

/// Turns fetched location records into a [`RegionGraph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    security_threshold: f64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SECURITY_THRESHOLD)
    }
}

impl GraphBuilder {
    pub fn new(security_threshold: f64) -> Self {
        GraphBuilder { security_threshold }
    }

    pub fn security_threshold(&self) -> f64 {
        self.security_threshold
    }

    /// Builds the region graph from `records`.
    ///
    /// - Records with `security >= threshold` (or a NaN rating) are dropped,
    ///   along with every reference to them.
    /// - Missing kill and jump statistics become zero.
    /// - Neighbor references to ids outside the surviving set are ignored.
    /// - Each adjacency is stored once under its `(min, max)` key, so mutual
    ///   declarations collapse and self references never become edges.
    pub fn build(&self, records: &HashMap<LocationId, RawLocationRecord>) -> RegionGraph {
        let kept: HashMap<LocationId, &RawLocationRecord> = records
            .iter()
            .filter(|(_, record)| record.security < self.security_threshold)
            .map(|(&id, record)| (id, record))
            .collect();

        debug!(
            total = records.len(),
            kept = kept.len(),
            threshold = self.security_threshold,
            "filtered locations by security rating"
        );

        let locations: Vec<Location> = kept
            .iter()
            .map(|(&id, record)| Location::from_record(id, record))
            .collect();

        let mut edges: BTreeSet<EdgeKey> = BTreeSet::new();
        for (&id, record) in &kept {
            for &neighbor in &record.neighbors {
                if neighbor == id {
                    continue;
                }
                if !kept.contains_key(&neighbor) {
                    trace!(from = id, to = neighbor, "dropping neighbor outside working set");
                    continue;
                }
                edges.insert(edge_key(id, neighbor));
            }
        }

        debug!(
            vertices = locations.len(),
            edges = edges.len(),
            "assembled region graph"
        );

        RegionGraph::assemble(locations, edges)
    }
}
