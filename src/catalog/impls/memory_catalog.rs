use async_trait::async_trait;
use crate::catalog::errors::CatalogError;
use crate::catalog::structs::catalog_record::CatalogRecord;
use crate::catalog::structs::memory_catalog::MemoryCatalog;
use crate::catalog::traits::catalog_backend::CatalogBackend;
use crate::identity::structs::info_hash::InfoHash;

#[async_trait]
impl CatalogBackend for MemoryCatalog {
    async fn load_records(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn upsert(&self, record: &CatalogRecord) -> Result<(), CatalogError> {
        self.records.write().insert(record.content_hash, record.clone());
        Ok(())
    }

    async fn remove(&self, content_hash: &InfoHash) -> Result<bool, CatalogError> {
        Ok(self.records.write().remove(content_hash).is_some())
    }
}
