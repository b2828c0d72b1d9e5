/// AnnounceCoordinator implementation: announce rounds and the periodic schedule.
pub mod announce_coordinator;

/// AnnounceEvent implementation: Display.
pub mod announce_event;

/// StaticPeerDiscovery implementation: AnnounceBackend.
pub mod static_peer_discovery;

/// TrackerState implementation: success/failure accounting and backoff.
pub mod tracker_state;
