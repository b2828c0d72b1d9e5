/// One file of a catalog record.
pub mod catalog_file;

/// Persisted session record.
pub mod catalog_record;

/// Status block of a catalog record.
pub mod catalog_status;

/// Registry to catalog synchronizer.
pub mod catalog_reconciler;

/// JSON file backend.
pub mod json_catalog;

/// In-memory backend.
pub mod memory_catalog;

/// Outcome of a repair sweep.
pub mod repair_report;
