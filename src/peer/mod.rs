//! Peer connections.
//!
//! Every wire gets its own [`PeerConnection`](structs::peer_connection::PeerConnection)
//! state machine, driven by a dedicated task. The state order is fixed:
//!
//! ```text
//! Connecting -> HandshakeSent -> HandshakeComplete -> ExtensionNegotiated -> Closed
//! ```
//!
//! Any state may move to `Closed`; nothing leaves `Closed`. Extension messages are
//! authorized against the current state before they are written or accepted, so a
//! `ut_metadata` exchange can never start before both handshakes are done.
//!
//! The driver never touches session state directly: it reports
//! [`PeerEvent`](enums::peer_event::PeerEvent)s to the owning session and takes
//! [`PeerCommand`](enums::peer_command::PeerCommand)s back.

/// Connection states, close reasons and the messages exchanged with the session.
pub mod enums;

/// Implementation blocks for the state machine and the driver.
pub mod impls;

/// Connection driver task and inbound listener.
#[allow(clippy::module_inception)]
pub mod peer;

/// State machine and driver structs.
pub mod structs;

/// Byte stream abstraction used by the driver.
pub mod traits;
