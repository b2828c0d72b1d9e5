//! Command surface of the swarm core.
//!
//! [`SwarmApi`](structs::swarm_api::SwarmApi) is what an embedding application or
//! front end talks to. It resolves content hashes to sessions, forwards session
//! commands and reads payload files from the storage root. Errors are reported as
//! [`ApiError`](enums::api_error::ApiError).
//!
//! | Operation | Returns |
//! |-----------|---------|
//! | `ensure_session(identifier, options)` | [`SessionInfo`](structs::session_info::SessionInfo) |
//! | `remove_session(hash, purge_data)` | `bool`, false for unknown hashes |
//! | `pause(hash)` / `resume(hash)` | `()` |
//! | `get_file_contents(hash, filename)` | file bytes |
//! | `get_all_file_contents(hash)` | path to bytes map |
//! | `get_tracker_health()` | per-endpoint health |

/// API error type.
pub mod enums;

/// Implementation blocks.
pub mod impls;

/// API facade and response structs.
pub mod structs;
