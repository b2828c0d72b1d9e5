use std::collections::BTreeMap;
use parking_lot::RwLock;
use crate::catalog::structs::catalog_record::CatalogRecord;
use crate::identity::structs::info_hash::InfoHash;

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    pub records: RwLock<BTreeMap<InfoHash, CatalogRecord>>,
}
