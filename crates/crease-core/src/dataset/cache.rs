// Memoized session table.
//
// The first successful load is kept for the lifetime of the cache. The only
// invalidation triggers are `invalidate()` / `refresh()`; a fresh process
// starts with an empty cache.

use std::sync::Arc;

use tracing::{debug, info};

use super::loader::{self, SeasonSource};
use super::{BattingTable, DatasetError};

pub struct DatasetCache<S> {
    source: S,
    years: Vec<u16>,
    table: Option<Arc<BattingTable>>,
    loads: usize,
}

impl<S: SeasonSource> DatasetCache<S> {
    pub fn new(source: S, years: Vec<u16>) -> Self {
        DatasetCache {
            source,
            years,
            table: None,
            loads: 0,
        }
    }

    /// The cached table, loading it on first use.
    pub fn get(&mut self) -> Result<Arc<BattingTable>, DatasetError> {
        if let Some(table) = &self.table {
            debug!("dataset cache hit ({} rows)", table.len());
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(loader::load_table(&self.source, &self.years)?);
        self.loads += 1;
        info!(
            "dataset loaded: {} rows across {} seasons",
            table.len(),
            self.years.len()
        );
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table; the next `get` reloads from the source.
    pub fn invalidate(&mut self) {
        if self.table.take().is_some() {
            info!("dataset cache invalidated");
        }
    }

    /// Reload from the source now. On failure the cache is left empty.
    pub fn refresh(&mut self) -> Result<Arc<BattingTable>, DatasetError> {
        self.invalidate();
        self.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Number of loads performed (cache misses) so far.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    pub fn years(&self) -> &[u16] {
        &self.years
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::tests::{MemorySource, SEASON_2016, SEASON_2017};

    fn source() -> MemorySource {
        MemorySource::default()
            .with(2016, SEASON_2016)
            .with(2017, SEASON_2017)
    }

    #[test]
    fn first_get_loads_then_hits() {
        let mut cache = DatasetCache::new(source(), vec![2016, 2017]);
        assert!(!cache.is_loaded());

        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.load_count(), 1);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn refresh_reloads() {
        let mut cache = DatasetCache::new(source(), vec![2016, 2017]);
        let before = cache.get().unwrap();
        let after = cache.refresh().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn invalidate_forces_reload_on_next_get() {
        let mut cache = DatasetCache::new(source(), vec![2016]);
        cache.get().unwrap();
        cache.invalidate();
        assert!(!cache.is_loaded());
        cache.get().unwrap();
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let mut cache = DatasetCache::new(source(), vec![2016, 2018]);
        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
        assert_eq!(cache.load_count(), 0);
    }
}
