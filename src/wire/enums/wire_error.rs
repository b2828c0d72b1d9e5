use thiserror::Error;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected protocol identifier")]
    InvalidProtocol,

    #[error("frame of {0} bytes exceeds the allowed maximum")]
    FrameTooLarge(u32),

    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("bencode error: {0}")]
    Bencode(String),
}
