use crate::session::enums::session_role::SessionRole;
use crate::session::structs::ensure_options::EnsureOptions;

impl EnsureOptions {
    pub fn seeding(metadata: Vec<u8>) -> EnsureOptions {
        EnsureOptions {
            role: SessionRole::Seeding,
            metadata: Some(metadata),
        }
    }

    pub fn with_metadata(metadata: Vec<u8>) -> EnsureOptions {
        EnsureOptions {
            role: SessionRole::Leeching,
            metadata: Some(metadata),
        }
    }
}
