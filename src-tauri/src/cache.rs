use std::sync::Arc;

use crate::config::CrmConfig;
use crate::crm::{self, CrmData};
use crate::error::Result;
use crate::excel;

/// Result of a cache lookup
pub struct Cached {
    pub data: Arc<CrmData>,
    /// True when this lookup (re)loaded the workbook
    pub reloaded: bool,
}

/// Last loaded workbook, keyed by its checksum
#[derive(Debug, Default)]
pub struct DataCache {
    data: Option<Arc<CrmData>>,
    generation: u64,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached data while the workbook checksum is unchanged, a fresh load otherwise
    pub fn get_or_load(&mut self, config: &CrmConfig) -> Result<Cached> {
        let checksum = excel::compute_checksum(&config.workbook_path)?;

        if let Some(data) = &self.data {
            if data.checksum == checksum {
                return Ok(Cached {
                    data: data.clone(),
                    reloaded: false,
                });
            }
            log::info!("Workbook checksum changed, reloading");
        }

        let data = Arc::new(crm::load_workbook(config)?);
        self.data = Some(data.clone());
        self.generation += 1;

        Ok(Cached {
            data,
            reloaded: true,
        })
    }

    pub fn invalidate(&mut self) {
        if self.data.take().is_some() {
            log::debug!("Data cache invalidated");
        }
    }

    pub fn current(&self) -> Option<Arc<CrmData>> {
        self.data.clone()
    }

    /// Number of loads so far; changes whenever the cached data is replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrmError;
    use crate::test_support::{companies_table, people_table, write_sample_workbook};

    #[test]
    fn test_second_lookup_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = CrmConfig::with_workbook(write_sample_workbook(dir.path(), false));
        let mut cache = DataCache::new();

        let first = cache.get_or_load(&config).unwrap();
        assert!(first.reloaded);
        assert_eq!(first.data.companies.len(), 6);

        let second = cache.get_or_load(&config).unwrap();
        assert!(!second.reloaded);
        assert!(Arc::ptr_eq(&first.data, &second.data));
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn test_changed_workbook_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_workbook(dir.path(), false);
        let config = CrmConfig::with_workbook(&path);
        let mut cache = DataCache::new();
        cache.get_or_load(&config).unwrap();

        let mut companies = companies_table();
        companies.rows.truncate(2);
        excel::write_tables(&[companies, people_table(false)], &path).unwrap();

        let reloaded = cache.get_or_load(&config).unwrap();
        assert!(reloaded.reloaded);
        assert_eq!(reloaded.data.companies.len(), 2);
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = CrmConfig::with_workbook(write_sample_workbook(dir.path(), false));
        let mut cache = DataCache::new();
        cache.get_or_load(&config).unwrap();

        cache.invalidate();
        assert!(cache.current().is_none());
        assert!(cache.get_or_load(&config).unwrap().reloaded);
    }

    #[test]
    fn test_missing_workbook() {
        let mut cache = DataCache::new();
        let config = CrmConfig::with_workbook("/nonexistent/crm.xlsx");
        assert!(matches!(cache.get_or_load(&config), Err(CrmError::FileNotFound(_))));
    }
}
