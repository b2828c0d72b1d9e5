use crate::peer::enums::close_reason::CloseReason;
use crate::wire::structs::peer_id::PeerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    HandshakeComplete { peer_id: PeerId },
    ExtensionNegotiated { supports_metadata: bool, metadata_size: Option<u32> },
    MetadataRequested { piece: u32 },
    MetadataPiece { piece: u32, total_size: Option<u32>, data: Vec<u8> },
    MetadataRejected { piece: u32 },
    Closed { reason: CloseReason },
}
