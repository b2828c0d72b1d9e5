use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use crate::catalog::structs::catalog_record::CatalogRecord;
use crate::identity::structs::info_hash::InfoHash;

/// Records kept in one JSON file. The in-memory copy is loaded on first use.
#[derive(Debug)]
pub struct JsonCatalog {
    pub path: PathBuf,
    pub(crate) records: Mutex<Option<BTreeMap<InfoHash, CatalogRecord>>>,
}
