use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    pub name: String,
    pub path: String,
    pub size: u64,
}
