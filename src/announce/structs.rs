/// Per-endpoint state, backoff and health tracking.
pub mod tracker_state;

/// Health view returned to callers.
pub mod tracker_health;

/// What a session asks the coordinator to announce.
pub mod announce_request;

/// The coordinator owning all endpoint state.
pub mod announce_coordinator;

/// Discovery backend serving configured bootstrap peers.
pub mod static_peer_discovery;
