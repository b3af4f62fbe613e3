use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{LocationSource, RegionId};
use common::types::{LocationId, RawLocationRecord};

/// Every fourth simulated location is high-security space.
const HIGHSEC_EVERY: usize = 4;

/// Probability that the activity feed has no entry for a location.
const MISSING_ACTIVITY_PROBABILITY: f64 = 0.25;

/// Probability that a location lists a neighbor outside the generated set.
const DANGLING_NEIGHBOR_PROBABILITY: f64 = 0.1;

/// Produces a synthetic catalog for offline runs.
///
/// Each region is a ring of `locations_per_region` systems with
/// `extra_links` random one-sided chords. Consecutive regions are joined by a
/// single gate. Ids are handed out sequentially from `first_location_id`, so
/// the first system of the first region is always `first_location_id`, and
/// the first three systems of every region are never high-security.
pub struct SimulatedSource {
    regions: HashMap<RegionId, Vec<LocationId>>,
    records: HashMap<LocationId, RawLocationRecord>,
}

impl SimulatedSource {
    pub fn generate(config: &SimulatorConfig, region_ids: &[RegionId]) -> Self {
        let mut rng: SmallRng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let per_region = config.locations_per_region;
        let total = per_region * region_ids.len();
        let outside_base = config.first_location_id + total as LocationId;

        let mut regions: HashMap<RegionId, Vec<LocationId>> = HashMap::new();
        let mut records: HashMap<LocationId, RawLocationRecord> = HashMap::new();

        for (r, &region_id) in region_ids.iter().enumerate() {
            let first = config.first_location_id + (r * per_region) as LocationId;
            let ids: Vec<LocationId> = (0..per_region).map(|i| first + i as LocationId).collect();

            for (i, &id) in ids.iter().enumerate() {
                let security = if i % HIGHSEC_EVERY == HIGHSEC_EVERY - 1 {
                    rng.random_range(0.45..=1.0)
                } else {
                    rng.random_range(-1.0..0.45)
                };

                let mut neighbors = Vec::new();
                if per_region > 1 {
                    neighbors.push(ids[(i + per_region - 1) % per_region]);
                    neighbors.push(ids[(i + 1) % per_region]);
                }
                if rng.random_bool(DANGLING_NEIGHBOR_PROBABILITY) {
                    neighbors.push(outside_base + rng.random_range(0..1000));
                }

                let (ship_kills, npc_kills, jumps) = if rng.random_bool(MISSING_ACTIVITY_PROBABILITY) {
                    (None, None, None)
                } else {
                    (
                        Some(rng.random_range(0..=config.max_kills)),
                        Some(rng.random_range(0..=config.max_kills.saturating_mul(10))),
                        Some(rng.random_range(0..=config.max_jumps)),
                    )
                };

                records.insert(
                    id,
                    RawLocationRecord {
                        name: format!("SIM-{}-{}", region_id, i),
                        security,
                        neighbors,
                        ship_kills,
                        npc_kills,
                        jumps,
                    },
                );
            }

            if per_region > 2 {
                for _ in 0..config.extra_links {
                    let a = ids[rng.random_range(0..per_region)];
                    let b = ids[rng.random_range(0..per_region)];
                    if let Some(record) = records.get_mut(&a) {
                        record.neighbors.push(b);
                    }
                }
            }

            regions.insert(region_id, ids);
        }

        // Join consecutive regions with one gate.
        for pair in region_ids.windows(2) {
            let (Some(from), Some(to)) = (
                regions.get(&pair[0]).and_then(|ids| ids.last().copied()),
                regions.get(&pair[1]).and_then(|ids| ids.first().copied()),
            ) else {
                continue;
            };
            if let Some(record) = records.get_mut(&from) {
                record.neighbors.push(to);
            }
        }

        SimulatedSource { regions, records }
    }

    pub fn num_locations(&self) -> usize {
        self.records.len()
    }
}

#[async_trait::async_trait]
impl LocationSource for SimulatedSource {
    async fn region_locations(&self, region: RegionId) -> Result<Vec<LocationId>, Error> {
        self.regions
            .get(&region)
            .cloned()
            .ok_or(Error::UnknownRegion(region))
    }

    async fn get_location(&self, id: LocationId) -> Result<RawLocationRecord, Error> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(Error::UnknownLocation(id))
    }
}
