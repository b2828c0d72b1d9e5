use std::net::SocketAddr;
use async_trait::async_trait;
use crate::announce::enums::announce_error::AnnounceError;
use crate::announce::structs::announce_request::AnnounceRequest;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnounceBackend: Send + Sync {
    /// Whether this backend serves `endpoint`.
    fn handles(&self, endpoint: &str) -> bool;

    async fn announce(&self, endpoint: &str, request: &AnnounceRequest) -> Result<Vec<SocketAddr>, AnnounceError>;
}
