use std::collections::HashMap;
use tracing::{debug, info};

use super::{
    error::Error,
    types::{LocationSource, RegionId},
};
use common::types::{LocationId, RawLocationRecord};

/// Gathers every location of the requested regions before analysis starts.
pub struct Fetcher<S: LocationSource> {
    source: S,
}

impl<S> Fetcher<S>
where
    S: LocationSource,
{
    pub fn new(source: S) -> Self {
        Fetcher { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches all locations of `region_ids`, one at a time.
    ///
    /// The returned map is complete; the core never sees a partially
    /// fetched region.
    pub async fn fetch_regions(
        &self,
        region_ids: &[RegionId],
    ) -> Result<HashMap<LocationId, RawLocationRecord>, Error> {
        let mut records = HashMap::new();

        for &region in region_ids {
            let ids = self.source.region_locations(region).await?;
            info!(region, systems = ids.len(), "obtained systems");

            let total = ids.len();
            for (i, id) in ids.into_iter().enumerate() {
                debug!("Parsing system {} / {}", i + 1, total);
                let record = self.source.get_location(id).await?;
                records.insert(id, record);
            }
        }

        info!(systems = records.len(), "done fetching systems");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedSource;
    use crate::csv_source::CsvSource;

    const MOCK_SYSTEMS: &str = "\
system_id,region_id,name,security,neighbors
1,100,A,0.1,2
2,100,B,0.1,1
3,200,C,0.1,1
";

    #[tokio::test]
    async fn test_fetch_regions_collects_all_requested() {
        let source = CsvSource::from_systems_reader(MOCK_SYSTEMS.as_bytes()).unwrap();
        let fetcher = Fetcher::new(source);

        let records = fetcher.fetch_regions(&[100, 200]).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[&3].name, "C");
    }

    #[tokio::test]
    async fn test_fetch_regions_only_requested() {
        let source = CsvSource::from_systems_reader(MOCK_SYSTEMS.as_bytes()).unwrap();
        let fetcher = Fetcher::new(source);

        let records = fetcher.fetch_regions(&[200]).await.unwrap();

        assert_eq!(records.keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[tokio::test]
    async fn test_unknown_region_fails() {
        let source = CsvSource::from_systems_reader(MOCK_SYSTEMS.as_bytes()).unwrap();
        let fetcher = Fetcher::new(source);

        let result = fetcher.fetch_regions(&[100, 300]).await;

        assert!(matches!(result, Err(Error::UnknownRegion(300))));
    }

    #[tokio::test]
    async fn test_second_run_served_from_cache() {
        let source = CsvSource::from_systems_reader(MOCK_SYSTEMS.as_bytes()).unwrap();
        let fetcher = Fetcher::new(CachedSource::new(source));

        let first = fetcher.fetch_regions(&[100]).await.unwrap();
        let misses = fetcher.source().misses();
        let second = fetcher.fetch_regions(&[100]).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.source().misses(), misses);
        assert_eq!(fetcher.source().hits(), 3);
    }
}
