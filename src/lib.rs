//! # magnet-swarm
//!
//! Swarm session and metadata-exchange core for magnet-addressed torrents.
//!
//! Given a magnet link or a bare content hash, the crate keeps exactly one swarm
//! session per content hash, negotiates the BitTorrent extension protocol with peers,
//! fetches and verifies the info dictionary over `ut_metadata`, tracks tracker health
//! and keeps a durable catalog of sessions in step with the live state.
//!
//! ## Modules
//!
//! - [`identity`] - magnet and bare-hash parsing into a content hash
//! - [`wire`] - BEP 3 handshake, BEP 10 extension protocol and BEP 9 metadata codec
//! - [`peer`] - per-connection state machine, connection driver and inbound listener
//! - [`metadata`] - metadata piece assembly, verification and info dictionary parsing
//! - [`announce`] - announce scheduling, backoff and tracker health
//! - [`session`] - session actors and the session registry
//! - [`catalog`] - catalog backends and the reconciler
//! - [`api`] - command surface for embedding applications
//! - [`config`] - TOML configuration
//! - [`common`] - logging setup and shared helpers
//! - [`structs`] - CLI arguments

/// Announce scheduling and tracker health.
pub mod announce;

/// Command surface.
pub mod api;

/// Durable session catalog.
pub mod catalog;

/// Logging setup, peer id generation and the boot error type.
pub mod common;

/// Configuration loading and validation.
pub mod config;

/// Identifier resolution.
pub mod identity;

/// Metadata assembly and info dictionary parsing.
pub mod metadata;

/// Peer connections.
pub mod peer;

/// Swarm sessions and the registry.
pub mod session;

/// CLI argument parsing.
pub mod structs;

/// Wire protocol codec.
pub mod wire;
