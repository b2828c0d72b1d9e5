//! Peer discovery announces.
//!
//! The [`AnnounceCoordinator`](structs::announce_coordinator::AnnounceCoordinator) keeps one
//! [`TrackerState`](structs::tracker_state::TrackerState) per announce endpoint for the
//! lifetime of the process. Endpoints are served by pluggable
//! [`AnnounceBackend`](traits::announce_backend::AnnounceBackend)s; the bundled one is the
//! static discovery backend fed from `announce.bootstrap_peers`. Network tracker transports
//! plug in through the same trait.
//!
//! A failing endpoint backs off exponentially (`interval * 2^failures`, capped at
//! `announce.backoff_max`) and is skipped by every session until its retry time.

/// Announce events, endpoint status and errors.
pub mod enums;

/// Implementation blocks.
pub mod impls;

/// Coordinator, endpoint state and the static discovery backend.
pub mod structs;

/// Backend seam for announce transports.
pub mod traits;

#[cfg(test)]
mod tests;
