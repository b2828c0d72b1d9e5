/// Messages from sessions to the reconciler.
pub mod catalog_update;

/// A write waiting to be retried.
pub mod pending_write;
