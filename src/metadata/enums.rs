/// Result of feeding a piece to the assembler.
pub mod assembly_outcome;

/// Metadata errors.
pub mod metadata_error;
