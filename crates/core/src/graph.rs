use std::collections::{BTreeSet, HashMap};

use common::error::Error;
use common::types::{EdgeKey, Location, LocationId};

/// Undirected region graph in Compressed Sparse Row (CSR) form.
///
/// Vertices are stored sorted by `LocationId`, so a vertex's node index is its
/// rank among the ids. Every undirected edge `{a, b}` appears once in `edges`
/// (as its `(min, max)` key) and twice in the CSR arrays, once per direction:
/// - `node_pointers[u]..node_pointers[u+1]` → neighbors of node `u`
/// - `edge_targets[i]` → target node of adjacency entry `i`
///
/// Each adjacency block is sorted by target index, which fixes the order in
/// which a traversal examines edges (ascending neighbor id).
#[derive(Debug, Clone)]
pub struct RegionGraph {
    pub locations: Vec<Location>,
    pub edges: BTreeSet<EdgeKey>,
    pub node_pointers: Vec<usize>,
    pub edge_targets: Vec<usize>,
    index_by_id: HashMap<LocationId, usize>,
}

impl RegionGraph {
    /// Creates a graph from vertices and canonical edge keys, validating the
    /// structural invariants.
    ///
    /// # Errors
    /// Returns `Error::InvalidGraph` if a location id is repeated, an edge is a
    /// self loop, an edge key is not in `(min, max)` order, or an edge
    /// endpoint is not one of `locations`.
    pub fn from_parts(locations: Vec<Location>, edges: BTreeSet<EdgeKey>) -> Result<Self, Error> {
        let mut ids = BTreeSet::new();
        for location in &locations {
            if !ids.insert(location.id) {
                return Err(Error::InvalidGraph);
            }
        }

        for &(a, b) in &edges {
            if a >= b || !ids.contains(&a) || !ids.contains(&b) {
                return Err(Error::InvalidGraph);
            }
        }

        Ok(Self::assemble(locations, edges))
    }

    /// Builds the CSR arrays for input that already satisfies the graph
    /// invariants.
    pub(crate) fn assemble(mut locations: Vec<Location>, edges: BTreeSet<EdgeKey>) -> Self {
        locations.sort_by_key(|location| location.id);

        let index_by_id: HashMap<LocationId, usize> = locations
            .iter()
            .enumerate()
            .map(|(idx, location)| (location.id, idx))
            .collect();

        let (node_pointers, edge_targets) =
            Self::build_csr_from_edges(locations.len(), &edges, &index_by_id);

        Self {
            locations,
            edges,
            node_pointers,
            edge_targets,
            index_by_id,
        }
    }

    /// Two-pass counting construction of the symmetric adjacency arrays.
    ///
    /// Edges are visited in ascending `(min, max)` id order and ids map
    /// monotonically to indices. A node `x` first receives its smaller
    /// neighbors (pairs `(u, x)`, `u < x`) and then its larger ones (pairs
    /// `(x, v)`), each group ascending, so every block ends up sorted.
    fn build_csr_from_edges(
        num_nodes: usize,
        edges: &BTreeSet<EdgeKey>,
        index_by_id: &HashMap<LocationId, usize>,
    ) -> (Vec<usize>, Vec<usize>) {
        let pairs: Vec<(usize, usize)> = edges
            .iter()
            .filter_map(|(a, b)| Some((*index_by_id.get(a)?, *index_by_id.get(b)?)))
            .collect();

        let mut node_pointers = vec![0; num_nodes + 1];

        for &(u, v) in &pairs {
            node_pointers[u + 1] += 1;
            node_pointers[v + 1] += 1;
        }

        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let mut edge_targets = vec![0; pairs.len() * 2];
        let mut cursor = node_pointers.clone();

        for &(u, v) in &pairs {
            edge_targets[cursor[u]] = v;
            cursor[u] += 1;
            edge_targets[cursor[v]] = u;
            cursor[v] += 1;
        }

        (node_pointers, edge_targets)
    }

    pub fn num_nodes(&self) -> usize {
        self.locations.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// O(1) lookup of the node index for a location id.
    pub fn index_of(&self, id: LocationId) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.index_by_id.contains_key(&id)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.index_of(id).map(|idx| &self.locations[idx])
    }

    /// Location id stored at node index `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= num_nodes()`.
    pub fn id_at(&self, idx: usize) -> LocationId {
        self.locations[idx].id
    }

    /// Neighbor node indices of node `idx`, in ascending order.
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.edge_targets[self.node_pointers[idx]..self.node_pointers[idx + 1]]
    }

    /// Degree of node `idx`.
    pub fn degree(&self, idx: usize) -> usize {
        self.node_pointers[idx + 1] - self.node_pointers[idx]
    }

    pub fn has_edge(&self, a: LocationId, b: LocationId) -> bool {
        self.edges.contains(&common::types::edge_key(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: LocationId) -> Location {
        Location {
            id,
            name: format!("S{}", id),
            security: 0.0,
            ship_kills: 0,
            npc_kills: 0,
            jumps: 0,
        }
    }

    fn edge_set(pairs: &[(LocationId, LocationId)]) -> BTreeSet<EdgeKey> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn from_parts_creates_symmetric_csr_for_small_graph() {
        // Unsorted locations on purpose.
        let locations = vec![location(30), location(10), location(20)];
        let graph = RegionGraph::from_parts(locations, edge_set(&[(10, 20), (20, 30)])).unwrap();

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.node_pointers, vec![0, 1, 3, 4]);
        assert_eq!(graph.edge_targets, vec![1, 0, 2, 1]);
        assert_eq!(graph.id_at(0), 10);
        assert_eq!(graph.index_of(30), Some(2));
    }

    #[test]
    fn adjacency_blocks_are_sorted() {
        let locations = (1..=5).map(location).collect();
        let graph =
            RegionGraph::from_parts(locations, edge_set(&[(3, 5), (1, 3), (2, 3), (3, 4)]))
                .unwrap();

        let centre = graph.index_of(3).unwrap();
        assert_eq!(graph.neighbors(centre), &[0, 1, 3, 4]);
        assert_eq!(graph.degree(centre), 4);
    }

    #[test]
    fn isolated_node_has_empty_block() {
        let graph =
            RegionGraph::from_parts(vec![location(1), location(2), location(3)], edge_set(&[(1, 2)]))
                .unwrap();

        let idx = graph.index_of(3).unwrap();
        assert!(graph.neighbors(idx).is_empty());
        assert_eq!(graph.degree(idx), 0);
    }

    #[test]
    fn empty_graph() {
        let graph = RegionGraph::from_parts(Vec::new(), BTreeSet::new()).unwrap();

        assert_eq!(graph.num_nodes(), 0);
        assert_eq!(graph.node_pointers, vec![0]);
        assert!(graph.edge_targets.is_empty());
    }

    #[test]
    fn has_edge_ignores_direction() {
        let graph =
            RegionGraph::from_parts(vec![location(1), location(2)], edge_set(&[(1, 2)])).unwrap();

        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(1, 1));
    }

    #[test]
    fn from_parts_rejects_self_loop() {
        let result = RegionGraph::from_parts(vec![location(1)], edge_set(&[(1, 1)]));
        assert_eq!(result.err(), Some(Error::InvalidGraph));
    }

    #[test]
    fn from_parts_rejects_dangling_endpoint() {
        let result = RegionGraph::from_parts(vec![location(1)], edge_set(&[(1, 2)]));
        assert_eq!(result.err(), Some(Error::InvalidGraph));
    }

    #[test]
    fn from_parts_rejects_non_canonical_key() {
        let result =
            RegionGraph::from_parts(vec![location(1), location(2)], edge_set(&[(2, 1)]));
        assert_eq!(result.err(), Some(Error::InvalidGraph));
    }

    #[test]
    fn from_parts_rejects_duplicate_location() {
        let result = RegionGraph::from_parts(vec![location(1), location(1)], BTreeSet::new());
        assert_eq!(result.err(), Some(Error::InvalidGraph));
    }

    #[test]
    fn location_lookup() {
        let graph = RegionGraph::from_parts(vec![location(42)], BTreeSet::new()).unwrap();

        assert_eq!(graph.location(42).map(|l| l.name.as_str()), Some("S42"));
        assert!(graph.location(7).is_none());
        assert!(!graph.contains(7));
    }
}
