use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerPeer {
    pub conn_id: u64,
    /// Order in which peers negotiated; earlier wins ties.
    pub sequence: u64,
    pub declared_size: Option<u32>,
    pub size_mismatch: bool,
    /// Consecutive contributions to failed assemblies.
    pub strikes: u32,
    /// When the peer last refused a request; it sits out until the request timeout passes.
    pub rejected_at: Option<Instant>,
}
