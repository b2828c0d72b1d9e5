/// Configuration loading errors.
pub mod configuration_error;

/// How strictly untrusted input is validated.
pub mod validation_strictness;

/// Durable catalog storage engine.
pub mod catalog_engine;
