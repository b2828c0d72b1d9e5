/// CloseReason implementation: Display.
pub mod close_reason;

/// HandshakeState implementation: ordering and Display.
pub mod handshake_state;

/// PeerConnection implementation: transitions and authorization.
pub mod peer_connection;

/// PeerDriver implementation: handshakes, message loop, shutdown.
pub mod peer_driver;

/// PeerDriverConfig implementation: construction from configuration.
pub mod peer_driver_config;
