use std::net::SocketAddr;
use thiserror::Error;
use crate::identity::enums::parse_error::ParseError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("supplied metadata does not hash to the content hash")]
    MetadataMismatch,

    #[error("session is paused")]
    Paused,

    #[error("session already has {0} peers")]
    TooManyPeers(usize),

    #[error("already connected to {0}")]
    DuplicatePeer(SocketAddr),

    #[error("session is closed")]
    Closed,

    #[error("timed out waiting for the session")]
    Timeout,
}
