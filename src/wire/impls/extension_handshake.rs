use std::borrow::Cow;
use std::collections::BTreeMap;
use bip_bencode::{ben_bytes, ben_int, ben_map, BDecodeOpt, BMutAccess, BRefAccess, BencodeRef};
use crate::wire::enums::wire_error::WireError;
use crate::wire::structs::extension_handshake::ExtensionHandshake;
use crate::wire::wire::{CLIENT_NAME, LOCAL_METADATA_ID, METADATA_EXTENSION_NAME};

impl ExtensionHandshake {
    /// Our own handshake: advertises `ut_metadata` and, when known, the metadata size.
    pub fn local(metadata_size: Option<u32>) -> ExtensionHandshake {
        let mut extensions = BTreeMap::new();
        extensions.insert(METADATA_EXTENSION_NAME.to_string(), LOCAL_METADATA_ID);
        ExtensionHandshake {
            extensions,
            metadata_size,
            client: Some(CLIENT_NAME.to_string()),
        }
    }

    /// The id the remote wants `ut_metadata` messages sent on, if enabled.
    pub fn metadata_extension_id(&self) -> Option<u8> {
        self.extensions.get(METADATA_EXTENSION_NAME).copied().filter(|id| *id != 0)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut extensions = ben_map!();
        if let Some(extensions_mut) = extensions.dict_mut() {
            for (name, id) in self.extensions.iter() {
                extensions_mut.insert(Cow::from(name.as_bytes().to_vec()), ben_int!(*id as i64));
            }
        }
        let mut root = ben_map! {
            "m" => extensions
        };
        if let Some(root_mut) = root.dict_mut() {
            if let Some(size) = self.metadata_size {
                root_mut.insert(Cow::from(b"metadata_size".to_vec()), ben_int!(size as i64));
            }
            if let Some(client) = &self.client {
                root_mut.insert(Cow::from(b"v".to_vec()), ben_bytes!(client.clone()));
            }
        }
        root.encode()
    }

    pub fn decode(payload: &[u8]) -> Result<ExtensionHandshake, WireError> {
        let bencode = BencodeRef::decode(payload, BDecodeOpt::new(8, false, false))
            .map_err(|e| WireError::Bencode(format!("{e:?}")))?;
        let root = bencode.dict()
            .ok_or_else(|| WireError::MalformedMessage("extension handshake is not a dictionary".to_string()))?;

        let mut extensions = BTreeMap::new();
        if let Some(m) = root.lookup(b"m").and_then(|value| value.dict()) {
            for (name, value) in m.to_list() {
                let Ok(name) = std::str::from_utf8(name) else {
                    continue;
                };
                let Some(id) = value.int() else {
                    continue;
                };
                if (0..=255).contains(&id) {
                    extensions.insert(name.to_string(), id as u8);
                }
            }
        }

        let metadata_size = match root.lookup(b"metadata_size").and_then(|value| value.int()) {
            Some(size) if size > 0 && size <= u32::MAX as i64 => Some(size as u32),
            Some(size) => {
                return Err(WireError::MalformedMessage(format!("invalid metadata_size {size}")));
            }
            None => None,
        };

        let client = root.lookup(b"v")
            .and_then(|value| value.bytes())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned());

        Ok(ExtensionHandshake {
            extensions,
            metadata_size,
            client,
        })
    }
}
