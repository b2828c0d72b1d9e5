use std::time::Duration;
use crate::config::structs::swarm_config::SwarmConfig;
use crate::metadata::structs::metadata_assembler_config::MetadataAssemblerConfig;

impl MetadataAssemblerConfig {
    pub fn from_swarm(config: &SwarmConfig) -> MetadataAssemblerConfig {
        MetadataAssemblerConfig {
            max_requests_per_peer: config.max_requests_per_peer.max(1),
            max_bad_contributions: config.max_bad_contributions.max(1),
            max_metadata_size: config.max_metadata_size,
            request_timeout: Duration::from_secs(config.metadata_request_timeout),
            validation: config.validation,
        }
    }
}
