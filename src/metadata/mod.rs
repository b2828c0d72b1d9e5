//! Metadata exchange.
//!
//! [`MetadataAssembler`](structs::metadata_assembler::MetadataAssembler) collects the
//! info dictionary from untrusted peers in 16 KiB pieces and only ever hands out bytes
//! whose SHA-1 equals the session's content hash. Peers contributing to a failed
//! assembly collect strikes; a peer reaching the configured limit is no longer asked.
//!
//! [`TorrentInfo`](structs::torrent_info::TorrentInfo) is the parsed form of a validated
//! info dictionary.

/// Assembly outcomes and errors.
pub mod enums;

/// Implementation blocks.
pub mod impls;

/// Piece arithmetic and hashing helpers.
#[allow(clippy::module_inception)]
pub mod metadata;

/// Assembler, assembly buffer and info dictionary structs.
pub mod structs;

#[cfg(test)]
mod tests;
