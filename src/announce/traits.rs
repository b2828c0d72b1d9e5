/// Announce transport seam.
pub mod announce_backend;
