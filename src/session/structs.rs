/// Options for `ensure_session`.
pub mod ensure_options;

/// Actor-side record of an attached peer.
pub mod peer_entry;

/// Caller-side handle to a session.
pub mod session_handle;

/// Session registry.
pub mod session_registry;

/// State shared between a handle's clones.
pub mod session_shared;

/// Published view of a session.
pub mod session_snapshot;

/// Session actor state.
pub mod torrent_session;
