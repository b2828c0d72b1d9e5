use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::Mutex;
use crate::catalog::errors::CatalogError;
use crate::catalog::structs::catalog_record::CatalogRecord;
use crate::catalog::structs::json_catalog::JsonCatalog;
use crate::catalog::traits::catalog_backend::CatalogBackend;
use crate::identity::structs::info_hash::InfoHash;

impl JsonCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> JsonCatalog {
        JsonCatalog {
            path: path.as_ref().to_path_buf(),
            records: Mutex::new(None),
        }
    }

    async fn read_file(&self) -> Result<BTreeMap<InfoHash, CatalogRecord>, CatalogError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("[CATALOG] {} does not exist yet, starting empty", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(|byte| byte.is_ascii_whitespace()) {
            return Ok(BTreeMap::new());
        }
        let records: Vec<CatalogRecord> = serde_json::from_slice(&data)?;
        debug!("[CATALOG] read {} records from {}", records.len(), self.path.display());
        Ok(records.into_iter().map(|record| (record.content_hash, record)).collect())
    }

    /// Writes all records to a sibling temp file and renames it over the catalog.
    async fn write_file(&self, records: &BTreeMap<InfoHash, CatalogRecord>) -> Result<(), CatalogError> {
        let list: Vec<&CatalogRecord> = records.values().collect();
        let data = serde_json::to_vec_pretty(&list)?;
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let temp = self.temp_path();
        tokio::fs::write(&temp, &data).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CatalogBackend for JsonCatalog {
    async fn load_records(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        let mut guard = self.records.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_file().await?);
        }
        Ok(guard.as_ref().map(|records| records.values().cloned().collect()).unwrap_or_default())
    }

    async fn upsert(&self, record: &CatalogRecord) -> Result<(), CatalogError> {
        let mut guard = self.records.lock().await;
        let mut records = match guard.take() {
            Some(records) => records,
            None => self.read_file().await?,
        };
        let previous = records.insert(record.content_hash, record.clone());
        let result = self.write_file(&records).await;
        if result.is_err() {
            match previous {
                Some(previous) => { records.insert(record.content_hash, previous); }
                None => { records.remove(&record.content_hash); }
            }
        }
        *guard = Some(records);
        result
    }

    async fn remove(&self, content_hash: &InfoHash) -> Result<bool, CatalogError> {
        let mut guard = self.records.lock().await;
        let mut records = match guard.take() {
            Some(records) => records,
            None => self.read_file().await?,
        };
        let Some(previous) = records.remove(content_hash) else {
            *guard = Some(records);
            return Ok(false);
        };
        let result = self.write_file(&records).await;
        if result.is_err() {
            records.insert(*content_hash, previous);
        }
        *guard = Some(records);
        result.map(|_| true)
    }
}
