/// SwarmApi implementation: session commands and payload file access.
pub mod swarm_api;
