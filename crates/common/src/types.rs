/// Opaque identifier of a location (solar system).
pub type LocationId = u64;

/// A route through the graph, as an ordered list of location ids.
pub type Cycle = Vec<LocationId>;

/// Unordered edge between two locations, stored as `(min, max)`.
pub type EdgeKey = (LocationId, LocationId);

/// Returns the canonical `(min, max)` key for the unordered pair `{a, b}`.
pub fn edge_key(a: LocationId, b: LocationId) -> EdgeKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// Per-location record as delivered by a data source.
///
/// The activity feeds omit locations that had no activity, so the statistics
/// are optional here and only resolved to zero when the graph is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawLocationRecord {
    pub name: String,
    pub security: f64,
    pub neighbors: Vec<LocationId>,
    pub ship_kills: Option<u32>,
    pub npc_kills: Option<u32>,
    pub jumps: Option<u32>,
}

/// A vertex of the region graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub security: f64,
    pub ship_kills: u32,
    pub npc_kills: u32,
    pub jumps: u32,
}

impl Location {
    /// Builds a vertex from a raw record, defaulting missing statistics to zero.
    pub fn from_record(id: LocationId, record: &RawLocationRecord) -> Self {
        Location {
            id,
            name: record.name.clone(),
            security: record.security,
            ship_kills: record.ship_kills.unwrap_or(0),
            npc_kills: record.npc_kills.unwrap_or(0),
            jumps: record.jumps.unwrap_or(0),
        }
    }
}

/// The recommended patrol loop together with its accumulated activity.
///
/// Totals are `u64` so that summing many `u32` counters cannot overflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoredRoute {
    pub path: Cycle,
    pub total_kills: u64,
    pub total_jumps: u64,
}

impl ScoredRoute {
    /// An empty route means no cycle was recommended.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns true if `id` lies on the route.
    pub fn contains(&self, id: LocationId) -> bool {
        self.path.contains(&id)
    }
}
