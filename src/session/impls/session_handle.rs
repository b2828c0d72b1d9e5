use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use futures_util::future::join_all;
use tokio::sync::{oneshot, watch};
use crate::identity::structs::info_hash::InfoHash;
use crate::peer::enums::peer_transport::PeerTransport;
use crate::peer::structs::peer_connection::PeerConnection;
use crate::session::enums::session_command::SessionCommand;
use crate::session::enums::session_error::SessionError;
use crate::session::enums::session_status::SessionStatus;
use crate::session::structs::session_handle::SessionHandle;
use crate::session::structs::session_snapshot::SessionSnapshot;

impl SessionHandle {
    pub fn content_hash(&self) -> InfoHash {
        self.shared.content_hash
    }

    pub fn source_uri(&self) -> &str {
        &self.shared.source_uri
    }

    pub fn display_name(&self) -> String {
        self.shared.snapshot_rx.borrow().display_name.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.shared.snapshot_rx.borrow().status
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.snapshot_rx.clone()
    }

    pub fn metadata(&self) -> Option<Arc<Vec<u8>>> {
        self.shared.snapshot_rx.borrow().metadata.clone()
    }

    /// Whether both handles refer to the same session instance.
    pub fn same_session(&self, other: &SessionHandle) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.shared.cancel_tx.borrow()
    }

    /// Waits until a published snapshot satisfies `predicate`.
    pub async fn wait_for<F>(&self, timeout: Duration, mut predicate: F) -> Result<SessionSnapshot, SessionError>
    where
        F: FnMut(&SessionSnapshot) -> bool,
    {
        let mut snapshot_rx = self.shared.snapshot_rx.clone();
        match tokio::time::timeout(timeout, snapshot_rx.wait_for(|snapshot| predicate(snapshot))).await {
            Ok(Ok(snapshot)) => Ok(snapshot.clone()),
            Ok(Err(_)) => Err(SessionError::Closed),
            Err(_) => Err(SessionError::Timeout),
        }
    }

    pub async fn wait_for_status(&self, status: SessionStatus, timeout: Duration) -> Result<SessionSnapshot, SessionError> {
        self.wait_for(timeout, |snapshot| snapshot.status == status).await
    }

    /// Hands a connection to the session; the returned receiver tracks its state machine.
    pub async fn attach_peer(&self, transport: PeerTransport, remote: SocketAddr) -> Result<watch::Receiver<PeerConnection>, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Attach { transport, remote, reply }).await?;
        response.await.map_err(|_| SessionError::Closed)?
    }

    pub async fn dial(&self, remote: SocketAddr) -> Result<watch::Receiver<PeerConnection>, SessionError> {
        self.attach_peer(PeerTransport::Dial, remote).await
    }

    pub async fn pause(&self) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Pause { reply }).await?;
        response.await.map_err(|_| SessionError::Closed)
    }

    pub async fn resume(&self) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Resume { reply }).await?;
        self.shared.find_more.notify_one();
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Progress of the payload transfer, from 0.0 to 1.0.
    pub async fn report_progress(&self, progress: f64) -> Result<(), SessionError> {
        self.send(SessionCommand::ReportProgress(progress)).await
    }

    pub(crate) async fn provide_metadata(&self, metadata: Arc<Vec<u8>>) -> Result<(), SessionError> {
        self.send(SessionCommand::ProvideMetadata(metadata)).await
    }

    /// Triggers an announce round outside the regular schedule.
    pub fn find_more_peers(&self) {
        self.shared.find_more.notify_one();
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        if self.is_cancelled() {
            return Err(SessionError::Closed);
        }
        self.shared.command_tx.send(command).await.map_err(|_| SessionError::Closed)
    }

    /// Cancels the session and waits for the actor and the announce schedule to end.
    pub(crate) async fn shutdown(&self) {
        self.shared.cancel_tx.send_replace(true);
        let tasks: Vec<_> = self.shared.tasks.lock().drain(..).collect();
        let _ = join_all(tasks).await;
    }
}
