/// EnsureOptions implementation: Default and builders.
pub mod ensure_options;

/// SessionHandle implementation: caller operations.
pub mod session_handle;

/// SessionRegistry implementation: dedup, removal, listing.
pub mod session_registry;

/// SessionRole and SessionStatus implementation: Display.
pub mod session_status;

/// SessionSnapshot implementation: peer counts.
pub mod session_snapshot;

/// TorrentSession implementation: the actor loop.
pub mod torrent_session;
