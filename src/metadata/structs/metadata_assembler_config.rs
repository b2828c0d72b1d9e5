use std::time::Duration;
use crate::config::enums::validation_strictness::ValidationStrictness;

#[derive(Debug, Clone, Copy)]
pub struct MetadataAssemblerConfig {
    pub max_requests_per_peer: usize,
    pub max_bad_contributions: u32,
    pub max_metadata_size: u32,
    pub request_timeout: Duration,
    pub validation: ValidationStrictness,
}
