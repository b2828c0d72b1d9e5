/// Identity of an ensured session.
pub mod session_info;

/// Command surface facade.
pub mod swarm_api;
