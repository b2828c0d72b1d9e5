use std::net::SocketAddr;
use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::peer::enums::close_reason::CloseReason;
use crate::peer::enums::connection_direction::ConnectionDirection;
use crate::peer::enums::handshake_state::HandshakeState;
use crate::wire::structs::peer_id::PeerId;

/// State of one wire. `interested` and `choking` describe the remote side.
#[derive(Debug, Clone, Serialize)]
pub struct PeerConnection {
    pub conn_id: u64,
    #[serde(skip)]
    pub peer_id: Option<PeerId>,
    pub remote: SocketAddr,
    pub direction: ConnectionDirection,
    pub handshake_state: HandshakeState,
    pub supports_metadata_ext: bool,
    pub metadata_ext_id: Option<u8>,
    pub declared_metadata_size: Option<u32>,
    pub interested: bool,
    pub choking: bool,
    pub connected_at: DateTime<Utc>,
    pub handshake_sent_at: Option<DateTime<Utc>>,
    pub handshake_completed_at: Option<DateTime<Utc>>,
    pub extension_negotiated_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub close_reason: Option<CloseReason>,
}
