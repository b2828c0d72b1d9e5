/// Per-connection driver task state.
pub mod peer_driver;

/// Driver tuning derived from the swarm configuration.
pub mod peer_driver_config;

/// Per-connection state machine.
pub mod peer_connection;
