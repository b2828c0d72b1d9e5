/// Per-peer bookkeeping inside the assembler.
pub mod assembler_peer;

/// Piece buffer for one assembly attempt.
pub mod metadata_assembly;

/// Piece scheduler and validator.
pub mod metadata_assembler;

/// Assembler limits derived from the swarm configuration.
pub mod metadata_assembler_config;

/// Parsed info dictionary.
pub mod torrent_info;

/// One file listed in an info dictionary.
pub mod torrent_file_entry;
