/// InfoHash implementation: Display, FromStr, hex/base32 decoding, Serialize, Deserialize.
pub mod info_hash;

/// IdentityResolver implementation: magnet and bare hash parsing.
pub mod identity_resolver;
