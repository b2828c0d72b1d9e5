use std::net::SocketAddr;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use crate::peer::enums::peer_command::PeerCommand;
use crate::peer::structs::peer_connection::PeerConnection;

pub struct PeerEntry {
    pub remote: SocketAddr,
    pub state_rx: watch::Receiver<PeerConnection>,
    pub command_tx: mpsc::Sender<PeerCommand>,
    pub task: JoinHandle<()>,
}
