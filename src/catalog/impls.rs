/// CatalogReconciler implementation: upserts, retries, reload and repair.
pub mod catalog_reconciler;

/// CatalogRecord implementation: conversion from session snapshots.
pub mod catalog_record;

/// JsonCatalog implementation: CatalogBackend over a JSON file.
pub mod json_catalog;

/// MemoryCatalog implementation: CatalogBackend over a map.
pub mod memory_catalog;
