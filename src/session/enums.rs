/// Messages handled by the session actor.
pub mod session_command;

/// Session errors.
pub mod session_error;

/// Seeding or leeching.
pub mod session_role;

/// Session status.
pub mod session_status;
