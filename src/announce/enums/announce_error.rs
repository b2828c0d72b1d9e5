use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnounceError {
    #[error("announce timed out after {0}s")]
    Timeout(u64),

    #[error("no backend handles endpoint {0}")]
    Unsupported(String),

    #[error("announce failed: {0}")]
    Backend(String),
}
