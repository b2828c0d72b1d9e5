use crate::announce::enums::announce_event::AnnounceEvent;
use crate::identity::structs::info_hash::InfoHash;
use crate::wire::structs::peer_id::PeerId;

#[derive(Debug, Clone)]
pub struct AnnounceRequest {
    pub info_hash: InfoHash,
    pub peer_id: PeerId,
    pub port: u16,
    pub event: AnnounceEvent,
    /// Endpoints this session announces to: configured trackers, identifier hints, discovery.
    pub endpoints: Vec<String>,
}
