use serde::Deserialize;

use super::error::Error;
use common::types::{LocationId, RawLocationRecord};

/// Identifier of a region (a group of constellations).
pub type RegionId = u64;

/// A trait defining the contract for any catalog that serves location data
/// to the fetch stage of the pipeline.
///
/// Decouples the fetcher from the concrete backend (CSV export vs. simulated
/// region). `Send + Sync` lets implementations run on the multi-threaded
/// Tokio runtime.
#[async_trait::async_trait]
pub trait LocationSource: Send + Sync {
    /// Ids of every location belonging to `region`.
    async fn region_locations(&self, region: RegionId) -> Result<Vec<LocationId>, Error>;

    /// Raw record for a single location. Activity statistics are `None` when
    /// the feed has no entry for the location.
    async fn get_location(&self, id: LocationId) -> Result<RawLocationRecord, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Read systems and activity from CSV exports.
    Csv,
    /// Generate a random region.
    Sim,
}
