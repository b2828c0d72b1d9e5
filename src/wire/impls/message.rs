use byteorder::{NetworkEndian, WriteBytesExt};
use crate::wire::enums::message::Message;
use crate::wire::enums::wire_error::WireError;

impl Message {
    pub fn id(&self) -> Option<u8> {
        match self {
            Message::KeepAlive => None,
            Message::Choke => Some(0),
            Message::Unchoke => Some(1),
            Message::Interested => Some(2),
            Message::NotInterested => Some(3),
            Message::Extended { .. } => Some(crate::wire::wire::EXTENDED_MESSAGE_ID),
            Message::Other { id, .. } => Some(*id),
        }
    }

    /// Encodes the message with its 4-byte big-endian length prefix.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(&mut out);
        out
    }

    pub fn write(&self, out: &mut Vec<u8>) -> Result<(), std::io::Error> {
        match self {
            Message::KeepAlive => {
                out.write_u32::<NetworkEndian>(0)?;
            }
            Message::Choke | Message::Unchoke | Message::Interested | Message::NotInterested => {
                out.write_u32::<NetworkEndian>(1)?;
                out.write_u8(self.id().unwrap_or_default())?;
            }
            Message::Extended { id, payload } => {
                out.write_u32::<NetworkEndian>(2 + payload.len() as u32)?;
                out.write_u8(crate::wire::wire::EXTENDED_MESSAGE_ID)?;
                out.write_u8(*id)?;
                out.extend_from_slice(payload);
            }
            Message::Other { id, payload } => {
                out.write_u32::<NetworkEndian>(1 + payload.len() as u32)?;
                out.write_u8(*id)?;
                out.extend_from_slice(payload);
            }
        }
        Ok(())
    }

    /// Parses a frame body (everything after the length prefix).
    pub fn from_frame(frame: &[u8]) -> Result<Message, WireError> {
        let Some((&id, rest)) = frame.split_first() else {
            return Ok(Message::KeepAlive);
        };
        match id {
            0..=3 => {
                if !rest.is_empty() {
                    return Err(WireError::MalformedMessage(format!("message {id} carries an unexpected payload")));
                }
                Ok(match id {
                    0 => Message::Choke,
                    1 => Message::Unchoke,
                    2 => Message::Interested,
                    _ => Message::NotInterested,
                })
            }
            crate::wire::wire::EXTENDED_MESSAGE_ID => {
                let Some((&ext_id, payload)) = rest.split_first() else {
                    return Err(WireError::MalformedMessage("extended message without an extension id".to_string()));
                };
                Ok(Message::Extended { id: ext_id, payload: payload.to_vec() })
            }
            _ => Ok(Message::Other { id, payload: rest.to_vec() }),
        }
    }
}
