//! Durable catalog of sessions.
//!
//! The catalog is a cache of the live registry, not a source of truth. Sessions push
//! [`CatalogUpdate`](enums::catalog_update::CatalogUpdate)s to the
//! [`CatalogReconciler`](structs::catalog_reconciler::CatalogReconciler), which writes
//! full records through a [`CatalogBackend`](traits::catalog_backend::CatalogBackend).
//!
//! Writes are at-least-once: a failed write is kept as pending and retried every
//! `catalog.retry_interval` seconds, and a repair sweep every `catalog.repair_interval`
//! seconds closes any gap between the live session set and the stored records.
//!
//! # Backends
//!
//! - **json**: one pretty-printed JSON file, replaced atomically on every write
//! - **memory**: process-local map, for tests and ephemeral runs

/// Catalog update messages and pending write kinds.
pub mod enums;

/// Error types for catalog operations.
pub mod errors;

/// Implementation blocks.
pub mod impls;

/// Backend selection.
#[allow(clippy::module_inception)]
pub mod catalog;

/// Records, backends and the reconciler.
pub mod structs;

/// Catalog backend trait definitions.
pub mod traits;

#[cfg(test)]
mod tests;
