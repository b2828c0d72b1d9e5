//! Configuration management module.
//!
//! Loads, saves and validates the daemon configuration from a TOML file.
//!
//! # Configuration Structure
//!
//! The configuration file (`config.toml`) contains:
//! - **log_level** / **log_console_interval**: logging settings
//! - **swarm**: listener, peer id, per-connection timeouts and metadata exchange limits
//! - **announce**: tracker endpoints, discovery backend and announce/backoff intervals
//! - **storage**: payload root directory
//! - **catalog**: durable catalog engine, location and reconciliation intervals
//!
//! # Example
//!
//! ```rust,ignore
//! use magnet_swarm::config::structs::configuration::Configuration;
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let default_config = Configuration::init();
//! ```

/// Configuration enumerations (validation strictness, catalog engine, errors).
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;

#[cfg(test)]
mod tests;
