use thiserror::Error;
use crate::identity::structs::info_hash::InfoHash;
use crate::session::enums::session_error::SessionError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("no session for {0}")]
    UnknownSession(InfoHash),

    #[error("metadata for {0} is not available yet")]
    MetadataUnavailable(InfoHash),

    #[error("file '{0}' is not part of the torrent")]
    UnknownFile(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
