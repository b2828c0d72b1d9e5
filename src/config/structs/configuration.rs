use serde::{Deserialize, Serialize};
use crate::config::structs::announce_config::AnnounceConfig;
use crate::config::structs::catalog_config::CatalogConfig;
use crate::config::structs::storage_config::StorageConfig;
use crate::config::structs::swarm_config::SwarmConfig;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Configuration {
    pub log_level: String,
    pub log_console_interval: u64,
    pub swarm: SwarmConfig,
    pub announce: AnnounceConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
}
