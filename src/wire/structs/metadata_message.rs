use crate::wire::enums::metadata_message_type::MetadataMessageType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataMessage {
    pub msg_type: MetadataMessageType,
    pub piece: u32,
    pub total_size: Option<u32>,
    pub data: Vec<u8>,
}
