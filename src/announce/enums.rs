/// Announce error type.
pub mod announce_error;

/// Announce lifecycle events.
pub mod announce_event;

/// Endpoint status.
pub mod tracker_status;
