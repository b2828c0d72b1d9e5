use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("declared metadata size {reported} differs from {declared}")]
    SizeMismatch { declared: u32, reported: u32 },

    #[error("declared metadata size {size} exceeds the limit of {limit}")]
    TooLarge { size: u32, limit: u32 },

    #[error("no metadata size has been declared yet")]
    SizeUnknown,

    #[error("piece {0} was not requested from this peer")]
    UnexpectedPiece(u32),

    #[error("piece {piece} has {actual} bytes, expected {expected}")]
    PieceLength { piece: u32, expected: usize, actual: usize },

    #[error("metadata does not hash to the content hash")]
    ChecksumMismatch,

    #[error("invalid info dictionary: {0}")]
    InvalidInfo(String),
}
