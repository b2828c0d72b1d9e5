use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use crate::peer::enums::peer_transport::PeerTransport;
use crate::peer::structs::peer_connection::PeerConnection;
use crate::session::enums::session_error::SessionError;

pub enum SessionCommand {
    Attach {
        transport: PeerTransport,
        remote: SocketAddr,
        reply: oneshot::Sender<Result<watch::Receiver<PeerConnection>, SessionError>>,
    },
    /// Hash-checked metadata supplied by a caller after the session was created.
    ProvideMetadata(Arc<Vec<u8>>),
    Pause { reply: oneshot::Sender<()> },
    Resume { reply: oneshot::Sender<()> },
    ReportProgress(f64),
}
