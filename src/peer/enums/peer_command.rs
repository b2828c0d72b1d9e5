use crate::peer::enums::close_reason::CloseReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerCommand {
    RequestMetadata(u32),
    SendMetadata { piece: u32, total_size: u32, data: Vec<u8> },
    RejectMetadata(u32),
    Close(CloseReason),
}
