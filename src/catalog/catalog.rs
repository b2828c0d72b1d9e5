use std::sync::Arc;
use log::info;
use crate::catalog::structs::json_catalog::JsonCatalog;
use crate::catalog::structs::memory_catalog::MemoryCatalog;
use crate::catalog::traits::catalog_backend::CatalogBackend;
use crate::config::enums::catalog_engine::CatalogEngine;
use crate::config::structs::catalog_config::CatalogConfig;

pub fn build_catalog(config: &CatalogConfig) -> Arc<dyn CatalogBackend> {
    match config.engine {
        CatalogEngine::json => {
            info!("[CATALOG] engine {} at {}", config.engine, config.path);
            Arc::new(JsonCatalog::new(&config.path))
        }
        CatalogEngine::memory => {
            info!("[CATALOG] engine {}, records are lost on exit", config.engine);
            Arc::new(MemoryCatalog::default())
        }
    }
}
