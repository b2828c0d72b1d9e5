use std::fmt;
use crate::config::enums::catalog_engine::CatalogEngine;

impl fmt::Display for CatalogEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogEngine::json => write!(f, "json"),
            CatalogEngine::memory => write!(f, "memory"),
        }
    }
}
