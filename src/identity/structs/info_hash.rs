//! Content hash identifier.

/// A 20-byte content hash.
///
/// This is the SHA-1 digest of a torrent's info dictionary and the key every
/// session, catalog record and wire handshake is addressed by.
///
/// # Example
///
/// ```rust
/// use magnet_swarm::identity::structs::info_hash::InfoHash;
///
/// let hash = InfoHash([0u8; 20]);
/// assert_eq!(hash.to_string().len(), 40);
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct InfoHash(pub [u8; 20]);
