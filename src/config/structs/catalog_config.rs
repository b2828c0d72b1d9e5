use serde::{Deserialize, Serialize};
use crate::config::enums::catalog_engine::CatalogEngine;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CatalogConfig {
    pub engine: CatalogEngine,
    pub path: String,
    pub retry_interval: u64,
    pub repair_interval: u64,
}
