//! Data structures for identifier resolution.

/// 20-byte content hash, the canonical key of every session.
pub mod info_hash;

/// Stateless resolver entry point.
pub mod identity_resolver;

/// Result of resolving an identifier.
pub mod resolved_identity;
