/// Storage seam for catalog records.
pub mod catalog_backend;
