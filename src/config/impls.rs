/// Configuration implementation: defaults, loading, saving, validation.
pub mod configuration;

/// ConfigurationError implementation: Display and Error.
pub mod configuration_error;

/// ValidationStrictness implementation: Display and policy helpers.
pub mod validation_strictness;

/// CatalogEngine implementation: Display.
pub mod catalog_engine;
