use crate::identity::structs::info_hash::InfoHash;
use crate::wire::enums::wire_error::WireError;
use crate::wire::structs::handshake::Handshake;
use crate::wire::structs::peer_id::PeerId;
use crate::wire::wire::{EXTENSION_BIT, EXTENSION_BYTE, HANDSHAKE_LEN, PROTOCOL_STRING};

impl Handshake {
    pub fn new(info_hash: InfoHash, peer_id: PeerId) -> Handshake {
        let mut reserved = [0u8; 8];
        reserved[EXTENSION_BYTE] |= EXTENSION_BIT;
        Handshake {
            reserved,
            info_hash,
            peer_id,
        }
    }

    pub fn supports_extensions(&self) -> bool {
        self.reserved[EXTENSION_BYTE] & EXTENSION_BIT != 0
    }

    pub fn to_bytes(&self) -> [u8; HANDSHAKE_LEN] {
        let mut out = [0u8; HANDSHAKE_LEN];
        out[0] = PROTOCOL_STRING.len() as u8;
        out[1..20].copy_from_slice(PROTOCOL_STRING);
        out[20..28].copy_from_slice(&self.reserved);
        out[28..48].copy_from_slice(&self.info_hash.0);
        out[48..68].copy_from_slice(&self.peer_id.0);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Handshake, WireError> {
        if bytes.len() < HANDSHAKE_LEN {
            return Err(WireError::MalformedMessage(format!("handshake too short: {} bytes", bytes.len())));
        }
        if bytes[0] as usize != PROTOCOL_STRING.len() || &bytes[1..20] != PROTOCOL_STRING {
            return Err(WireError::InvalidProtocol);
        }
        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[20..28]);
        let mut info_hash = [0u8; 20];
        info_hash.copy_from_slice(&bytes[28..48]);
        let mut peer_id = [0u8; 20];
        peer_id.copy_from_slice(&bytes[48..68]);
        Ok(Handshake {
            reserved,
            info_hash: InfoHash(info_hash),
            peer_id: PeerId(peer_id),
        })
    }
}
