/// MetadataAssembler implementation: peers, scheduling, validation.
pub mod metadata_assembler;

/// MetadataAssembly implementation: piece storage.
pub mod metadata_assembly;

/// MetadataAssemblerConfig implementation: construction from configuration.
pub mod metadata_assembler_config;

/// TorrentInfo implementation: bencode parsing.
pub mod torrent_info;
