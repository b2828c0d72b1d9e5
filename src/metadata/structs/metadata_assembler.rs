use std::collections::BTreeMap;
use crate::identity::structs::info_hash::InfoHash;
use crate::metadata::structs::assembler_peer::AssemblerPeer;
use crate::metadata::structs::metadata_assembler_config::MetadataAssemblerConfig;
use crate::metadata::structs::metadata_assembly::MetadataAssembly;

#[derive(Debug)]
pub struct MetadataAssembler {
    pub info_hash: InfoHash,
    pub config: MetadataAssemblerConfig,
    pub assembly: MetadataAssembly,
    pub peers: BTreeMap<u64, AssemblerPeer>,
    /// Number of failed checksum verifications so far.
    pub failed_attempts: u32,
    pub(crate) next_sequence: u64,
    pub(crate) cursor: usize,
}
