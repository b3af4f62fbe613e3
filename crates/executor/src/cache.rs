use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::trace;

use super::error::Error;
use super::types::{LocationSource, RegionId};
use common::types::{LocationId, RawLocationRecord};

/// Response cache in front of a [`LocationSource`].
///
/// The cache is created empty together with the wrapper and only ever grows;
/// nothing is evicted during a run. Errors are not cached.
pub struct CachedSource<S> {
    inner: S,
    regions: RwLock<HashMap<RegionId, Vec<LocationId>>>,
    locations: RwLock<HashMap<LocationId, RawLocationRecord>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<S> CachedSource<S>
where
    S: LocationSource,
{
    pub fn new(inner: S) -> Self {
        CachedSource {
            inner,
            regions: RwLock::new(HashMap::new()),
            locations: RwLock::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl<S> LocationSource for CachedSource<S>
where
    S: LocationSource,
{
    async fn region_locations(&self, region: RegionId) -> Result<Vec<LocationId>, Error> {
        if let Some(ids) = self.regions.read().await.get(&region) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(ids.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let ids = self.inner.region_locations(region).await?;
        self.regions.write().await.insert(region, ids.clone());
        Ok(ids)
    }

    async fn get_location(&self, id: LocationId) -> Result<RawLocationRecord, Error> {
        if let Some(record) = self.locations.read().await.get(&id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(id, "cache hit");
            return Ok(record.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let record = self.inner.get_location(id).await?;
        self.locations.write().await.insert(id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Source that counts how often it is asked.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl LocationSource for CountingSource {
        async fn region_locations(&self, region: RegionId) -> Result<Vec<LocationId>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if region == 1 {
                Ok(vec![10, 11])
            } else {
                Err(Error::UnknownRegion(region))
            }
        }

        async fn get_location(&self, id: LocationId) -> Result<RawLocationRecord, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if id == 10 {
                Ok(RawLocationRecord {
                    name: "Ten".to_string(),
                    ..Default::default()
                })
            } else {
                Err(Error::UnknownLocation(id))
            }
        }
    }

    fn cached() -> (CachedSource<CountingSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CachedSource::new(CountingSource {
            calls: calls.clone(),
        });
        (source, calls)
    }

    #[tokio::test]
    async fn test_repeated_lookup_hits_cache() {
        let (source, calls) = cached();

        let first = source.get_location(10).await.unwrap();
        let second = source.get_location(10).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.hits(), 1);
        assert_eq!(source.misses(), 1);
    }

    #[tokio::test]
    async fn test_region_lookup_is_cached() {
        let (source, calls) = cached();

        source.region_locations(1).await.unwrap();
        source.region_locations(1).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let (source, calls) = cached();

        assert!(source.get_location(99).await.is_err());
        assert!(source.get_location(99).await.is_err());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.hits(), 0);
    }
}
