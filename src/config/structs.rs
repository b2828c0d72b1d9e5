//! Configuration data structures.
//!
//! Each struct corresponds to a section in the TOML configuration file.

/// Root configuration structure containing all settings.
pub mod configuration;

/// Peer wire and metadata exchange settings.
pub mod swarm_config;

/// Tracker and discovery announce settings.
pub mod announce_config;

/// Payload storage settings.
pub mod storage_config;

/// Durable catalog settings.
pub mod catalog_config;
