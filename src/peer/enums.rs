/// Why a connection ended.
pub mod close_reason;

/// Who opened the connection.
pub mod connection_direction;

/// Illegal state machine use.
pub mod fsm_error;

/// Handshake state machine states.
pub mod handshake_state;

/// Commands from the session to a connection.
pub mod peer_command;

/// Events from a connection to its session.
pub mod peer_event;

/// Where the driver gets its byte stream from.
pub mod peer_transport;

/// Which bounded wait expired.
pub mod timeout_stage;
