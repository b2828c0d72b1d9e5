//! Swarm sessions.
//!
//! One session per content hash, owned by the
//! [`SessionRegistry`](structs::session_registry::SessionRegistry). Each session is a
//! single actor task ([`TorrentSession`](structs::torrent_session::TorrentSession)) that
//! owns its peer map and metadata assembler; peer drivers, the announce schedule and
//! callers only talk to it through channels. Callers hold a cheap
//! [`SessionHandle`](structs::session_handle::SessionHandle) and read state from a
//! [`SessionSnapshot`](structs::session_snapshot::SessionSnapshot) published on a watch
//! channel.
//!
//! # Lifecycle
//!
//! - created by the first `ensure_session` for a content hash; later calls for the same
//!   hash return the existing handle
//! - removed by `remove`, which cancels the actor, its peers and its announce schedule
//!   before the catalog record is dropped
//! - stopped (but kept in the catalog) by `shutdown_all` on process exit

/// Status, role, command and error enums.
pub mod enums;

/// Implementation blocks.
pub mod impls;

/// Registry, handle, snapshot and actor structs.
pub mod structs;
