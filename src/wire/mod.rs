//! Peer wire protocol codec.
//!
//! Covers the three message families the session core speaks:
//!
//! 1. the base handshake (BEP 3): protocol string, 8 reserved bytes with the
//!    extension bit set, content hash, peer id
//! 2. the extension handshake (BEP 10): a bencoded dictionary mapping extension
//!    names to message ids, optionally carrying `metadata_size`
//! 3. metadata messages (BEP 9): a bencoded `{msg_type, piece[, total_size]}`
//!    dictionary, followed by raw piece bytes for data messages
//!
//! Bulk transfer messages (have, bitfield, request, piece, ...) are framed and
//! surfaced as [`Message::Other`](crate::wire::enums::message::Message::Other)
//! so the connection can skip them; payload transfer lives elsewhere.

/// Message and error enumerations.
pub mod enums;

/// Implementation blocks for the codec types.
pub mod impls;

/// Handshake, extension handshake, metadata message and peer id structs.
pub mod structs;

/// Protocol constants and async frame readers/writers.
#[allow(clippy::module_inception)]
pub mod wire;
