use crate::wire::enums::metadata_message_type::MetadataMessageType;
use crate::wire::enums::wire_error::WireError;

impl MetadataMessageType {
    pub fn as_int(&self) -> i64 {
        match self {
            MetadataMessageType::Request => 0,
            MetadataMessageType::Data => 1,
            MetadataMessageType::Reject => 2,
        }
    }

    pub fn from_int(value: i64) -> Result<MetadataMessageType, WireError> {
        match value {
            0 => Ok(MetadataMessageType::Request),
            1 => Ok(MetadataMessageType::Data),
            2 => Ok(MetadataMessageType::Reject),
            other => Err(WireError::MalformedMessage(format!("unknown metadata msg_type {other}"))),
        }
    }
}
