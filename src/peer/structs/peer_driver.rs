use tokio::sync::{mpsc, watch};
use crate::identity::structs::info_hash::InfoHash;
use crate::peer::enums::peer_command::PeerCommand;
use crate::peer::enums::peer_event::PeerEvent;
use crate::peer::structs::peer_connection::PeerConnection;
use crate::peer::structs::peer_driver_config::PeerDriverConfig;
use crate::wire::structs::peer_id::PeerId;

/// Everything the task driving one wire owns.
pub struct PeerDriver {
    pub connection: PeerConnection,
    pub info_hash: InfoHash,
    pub local_peer_id: PeerId,
    /// Advertised in our extension handshake when the session holds metadata.
    pub local_metadata_size: Option<u32>,
    pub config: PeerDriverConfig,
    pub cancel_rx: watch::Receiver<bool>,
    pub command_rx: mpsc::Receiver<PeerCommand>,
    pub events_tx: mpsc::UnboundedSender<(u64, PeerEvent)>,
    pub state_tx: watch::Sender<PeerConnection>,
    pub(crate) extension_deadline: Option<tokio::time::Instant>,
}
