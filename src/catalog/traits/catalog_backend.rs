use async_trait::async_trait;
use crate::catalog::errors::CatalogError;
use crate::catalog::structs::catalog_record::CatalogRecord;
use crate::identity::structs::info_hash::InfoHash;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn load_records(&self) -> Result<Vec<CatalogRecord>, CatalogError>;

    /// Inserts or fully replaces the record for its content hash.
    async fn upsert(&self, record: &CatalogRecord) -> Result<(), CatalogError>;

    /// Returns whether a record existed.
    async fn remove(&self, content_hash: &InfoHash) -> Result<bool, CatalogError>;
}
