/// Handshake implementation: construction, encoding, decoding.
pub mod handshake;

/// Message implementation: framing and parsing.
pub mod message;

/// ExtensionHandshake implementation: bencode encoding and decoding.
pub mod extension_handshake;

/// MetadataMessage implementation: bencode header plus trailing piece data.
pub mod metadata_message;

/// MetadataMessageType implementation: integer conversion.
pub mod metadata_message_type;

/// PeerId implementation: Display, client detection.
pub mod peer_id;
