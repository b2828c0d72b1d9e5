use std::borrow::Cow;
use bip_bencode::{ben_int, ben_map, BDecodeOpt, BMutAccess, BRefAccess, BencodeRef};
use crate::wire::enums::metadata_message_type::MetadataMessageType;
use crate::wire::enums::wire_error::WireError;
use crate::wire::structs::metadata_message::MetadataMessage;

impl MetadataMessage {
    pub fn request(piece: u32) -> MetadataMessage {
        MetadataMessage {
            msg_type: MetadataMessageType::Request,
            piece,
            total_size: None,
            data: Vec::new(),
        }
    }

    pub fn data(piece: u32, total_size: u32, data: Vec<u8>) -> MetadataMessage {
        MetadataMessage {
            msg_type: MetadataMessageType::Data,
            piece,
            total_size: Some(total_size),
            data,
        }
    }

    pub fn reject(piece: u32) -> MetadataMessage {
        MetadataMessage {
            msg_type: MetadataMessageType::Reject,
            piece,
            total_size: None,
            data: Vec::new(),
        }
    }

    /// Bencoded header followed by the raw piece bytes for data messages.
    pub fn encode(&self) -> Vec<u8> {
        let mut header = ben_map! {
            "msg_type" => ben_int!(self.msg_type.as_int()),
            "piece" => ben_int!(self.piece as i64)
        };
        if let (Some(total_size), Some(header_mut)) = (self.total_size, header.dict_mut()) {
            header_mut.insert(Cow::from(b"total_size".to_vec()), ben_int!(total_size as i64));
        }
        let mut out = header.encode();
        out.extend_from_slice(&self.data);
        out
    }

    pub fn decode(payload: &[u8]) -> Result<MetadataMessage, WireError> {
        let bencode = BencodeRef::decode(payload, BDecodeOpt::new(4, false, false))
            .map_err(|e| WireError::Bencode(format!("{e:?}")))?;
        let header_len = bencode.buffer().len();
        let header = bencode.dict()
            .ok_or_else(|| WireError::MalformedMessage("metadata message is not a dictionary".to_string()))?;

        let msg_type = header.lookup(b"msg_type")
            .and_then(|value| value.int())
            .ok_or_else(|| WireError::MalformedMessage("metadata message without msg_type".to_string()))
            .and_then(MetadataMessageType::from_int)?;
        let piece = header.lookup(b"piece")
            .and_then(|value| value.int())
            .filter(|piece| *piece >= 0 && *piece <= u32::MAX as i64)
            .ok_or_else(|| WireError::MalformedMessage("metadata message without a valid piece".to_string()))? as u32;
        let total_size = header.lookup(b"total_size")
            .and_then(|value| value.int())
            .filter(|size| *size >= 0 && *size <= u32::MAX as i64)
            .map(|size| size as u32);

        let data = match msg_type {
            MetadataMessageType::Data => payload.get(header_len..).unwrap_or_default().to_vec(),
            _ => Vec::new(),
        };

        Ok(MetadataMessage {
            msg_type,
            piece,
            total_size,
            data,
        })
    }
}
