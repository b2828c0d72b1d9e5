use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier carries no content hash parameter")]
    MissingHash,

    #[error("invalid content hash: {0}")]
    InvalidHash(String),

    #[error("unsupported identifier scheme: {0}")]
    UnsupportedScheme(String),
}
