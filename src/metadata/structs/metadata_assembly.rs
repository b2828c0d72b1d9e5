use std::collections::BTreeMap;
use tokio::time::Instant;

/// Piece buffer for one attempt. Discarded on completion or checksum failure.
#[derive(Debug, Clone, Default)]
pub struct MetadataAssembly {
    pub declared_total_size: Option<u32>,
    pub piece_count: u32,
    pub pieces: BTreeMap<u32, Vec<u8>>,
    /// Which connection supplied each stored piece.
    pub contributors: BTreeMap<u32, u64>,
    /// Outstanding requests: piece to (connection, sent at).
    pub requested: BTreeMap<u32, (u64, Instant)>,
}
