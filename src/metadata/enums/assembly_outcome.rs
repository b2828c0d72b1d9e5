use crate::metadata::enums::metadata_error::MetadataError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyOutcome {
    /// Piece stored; more are missing.
    Pending,
    /// Every piece present and the bytes hash to the content hash.
    Complete(Vec<u8>),
    /// Every piece present but the checksum failed; all pieces were discarded.
    Rejected { offenders: Vec<u64> },
    /// The piece was not used.
    Ignored(MetadataError),
}
