/// Base protocol handshake.
pub mod handshake;

/// BEP 10 extension handshake payload.
pub mod extension_handshake;

/// BEP 9 metadata message.
pub mod metadata_message;

/// 20-byte peer identifier.
pub mod peer_id;
