use crate::identity::structs::info_hash::InfoHash;
use crate::wire::structs::peer_id::PeerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake {
    pub reserved: [u8; 8],
    pub info_hash: InfoHash,
    pub peer_id: PeerId,
}
