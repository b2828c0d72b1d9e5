use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::catalog::structs::catalog_file::CatalogFile;
use crate::catalog::structs::catalog_status::CatalogStatus;
use crate::identity::structs::info_hash::InfoHash;
use crate::session::enums::session_role::SessionRole;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub content_hash: InfoHash,
    pub display_name: String,
    #[serde(rename = "sourceURI")]
    pub source_uri: String,
    pub size: u64,
    pub files: Vec<CatalogFile>,
    pub status: CatalogStatus,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub role: SessionRole,
    /// Validated info dictionary, base64 encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}
