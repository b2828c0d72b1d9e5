use crate::identity::structs::info_hash::InfoHash;
use crate::session::structs::session_snapshot::SessionSnapshot;

#[derive(Debug, Clone)]
pub enum CatalogUpdate {
    Upsert(SessionSnapshot),
    Remove(InfoHash),
}
