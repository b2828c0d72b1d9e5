use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use futures_util::future::join_all;
use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use crate::common::common::flag_raised;
use crate::catalog::enums::catalog_update::CatalogUpdate;
use crate::identity::impls::identity_resolver::PLACEHOLDER_NAME;
use crate::metadata::enums::assembly_outcome::AssemblyOutcome;
use crate::metadata::metadata::metadata_piece;
use crate::metadata::structs::torrent_info::TorrentInfo;
use crate::peer::enums::close_reason::CloseReason;
use crate::peer::enums::connection_direction::ConnectionDirection;
use crate::peer::enums::peer_command::PeerCommand;
use crate::peer::enums::peer_event::PeerEvent;
use crate::peer::enums::peer_transport::PeerTransport;
use crate::peer::structs::peer_connection::PeerConnection;
use crate::peer::structs::peer_driver::PeerDriver;
use crate::session::enums::session_command::SessionCommand;
use crate::session::enums::session_error::SessionError;
use crate::session::enums::session_role::SessionRole;
use crate::session::enums::session_status::SessionStatus;
use crate::session::structs::peer_entry::PeerEntry;
use crate::session::structs::session_snapshot::SessionSnapshot;
use crate::session::structs::torrent_session::TorrentSession;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const PEER_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

impl TorrentSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            content_hash: self.content_hash,
            display_name: self.display_name.clone(),
            source_uri: self.source_uri.clone(),
            role: self.role,
            status: self.status,
            progress: self.progress,
            peers: self.peers.iter().map(|(conn_id, entry)| (*conn_id, entry.state_rx.borrow().clone())).collect(),
            metadata: self.metadata.clone(),
            info: self.info.clone(),
            metadata_size: self.metadata.as_ref().map(|metadata| metadata.len() as u32)
                .or_else(|| self.assembler.as_ref().and_then(|assembler| assembler.declared_total_size())),
            metadata_failures: self.metadata_failures,
            created: self.created,
        }
    }

    fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// The actor loop. Every mutation happens here, after checking the cancel signal.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::Receiver<SessionCommand>,
        mut events_rx: mpsc::UnboundedReceiver<(u64, PeerEvent)>,
        mut discovered_rx: mpsc::Receiver<Vec<SocketAddr>>,
    ) {
        info!("[SESSION] {} started ({:?}, {})", self.content_hash.short(), self.status, self.display_name);
        let mut cancel_rx = self.cancel_rx.clone();
        let mut tick = tokio::time::interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        if !self.is_cancelled() {
            let hints = self.known_peers.clone();
            self.dial_peers(hints);
            self.publish();
        }

        loop {
            tokio::select! {
                biased;
                _ = flag_raised(&mut cancel_rx) => break,
                command = command_rx.recv() => match command {
                    Some(command) => {
                        if self.is_cancelled() {
                            break;
                        }
                        self.handle_command(command);
                    }
                    None => break,
                },
                Some((conn_id, event)) = events_rx.recv() => {
                    if self.is_cancelled() {
                        break;
                    }
                    self.handle_peer_event(conn_id, event);
                }
                Some(peers) = discovered_rx.recv() => {
                    if self.is_cancelled() {
                        break;
                    }
                    self.discover_peers(peers);
                }
                _ = tick.tick() => {
                    if self.is_cancelled() {
                        break;
                    }
                    self.on_tick();
                }
            }
            self.publish();
        }

        self.stop(events_rx).await;
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Attach { transport, remote, reply } => {
                let result = self.spawn_peer(transport, remote);
                let _ = reply.send(result);
            }
            SessionCommand::ProvideMetadata(metadata) => {
                if self.metadata.is_none() {
                    info!("[SESSION] {} metadata supplied by caller", self.content_hash.short());
                    self.install_metadata(metadata.as_ref().clone());
                }
            }
            SessionCommand::Pause { reply } => {
                self.pause();
                let _ = reply.send(());
            }
            SessionCommand::Resume { reply } => {
                self.resume();
                let _ = reply.send(());
            }
            SessionCommand::ReportProgress(progress) => self.report_progress(progress),
        }
    }

    fn handle_peer_event(&mut self, conn_id: u64, event: PeerEvent) {
        match event {
            PeerEvent::HandshakeComplete { peer_id } => {
                debug!("[SESSION] {} peer #{} identified as {}", self.content_hash.short(), conn_id, peer_id.to_printable());
            }
            PeerEvent::ExtensionNegotiated { supports_metadata, metadata_size } => {
                if supports_metadata {
                    if let Some(assembler) = self.assembler.as_mut() {
                        if let Err(e) = assembler.add_peer(conn_id, metadata_size) {
                            debug!("[SESSION] {} peer #{}: {}", self.content_hash.short(), conn_id, e);
                        }
                    }
                }
                self.request_pieces();
            }
            PeerEvent::MetadataRequested { piece } => self.serve_piece(conn_id, piece),
            PeerEvent::MetadataPiece { piece, total_size, data } => {
                let Some(assembler) = self.assembler.as_mut() else {
                    return;
                };
                match assembler.receive_piece(conn_id, piece, total_size, data) {
                    AssemblyOutcome::Complete(metadata) => self.install_metadata(metadata),
                    AssemblyOutcome::Rejected { offenders } => {
                        self.metadata_failures += 1;
                        warn!("[SESSION] {} rejected assembled metadata from peers {:?}, retrying", self.content_hash.short(), offenders);
                        self.request_pieces();
                    }
                    AssemblyOutcome::Pending => self.request_pieces(),
                    AssemblyOutcome::Ignored(e) => {
                        debug!("[SESSION] {} ignored piece {} from #{}: {}", self.content_hash.short(), piece, conn_id, e);
                        self.request_pieces();
                    }
                }
            }
            PeerEvent::MetadataRejected { piece } => {
                if let Some(assembler) = self.assembler.as_mut() {
                    assembler.reject_piece(conn_id, piece, Instant::now());
                }
                self.request_pieces();
            }
            PeerEvent::Closed { reason } => {
                if self.peers.remove(&conn_id).is_some() {
                    debug!("[SESSION] {} dropped peer #{} ({})", self.content_hash.short(), conn_id, reason);
                }
                if let Some(assembler) = self.assembler.as_mut() {
                    assembler.remove_peer(conn_id);
                }
                self.request_pieces();
            }
        }
    }

    fn on_tick(&mut self) {
        if let Some(assembler) = self.assembler.as_mut() {
            let expired = assembler.expire_requests(Instant::now());
            if expired > 0 {
                debug!("[SESSION] {} {} metadata requests timed out", self.content_hash.short(), expired);
            }
            self.request_pieces();
        }
    }

    /// Sends newly scheduled metadata requests to their peers.
    fn request_pieces(&mut self) {
        if self.status == SessionStatus::Paused {
            return;
        }
        let Some(assembler) = self.assembler.as_mut() else {
            return;
        };
        for (conn_id, piece) in assembler.schedule(Instant::now()) {
            let sent = self.peers.get(&conn_id)
                .map(|entry| entry.command_tx.try_send(PeerCommand::RequestMetadata(piece)).is_ok())
                .unwrap_or(false);
            if !sent {
                assembler.release_request(conn_id, piece);
            }
        }
    }

    fn serve_piece(&mut self, conn_id: u64, piece: u32) {
        let Some(entry) = self.peers.get(&conn_id) else {
            return;
        };
        let command = match self.metadata.as_ref() {
            Some(metadata) => match metadata_piece(metadata, piece) {
                Some(data) => PeerCommand::SendMetadata { piece, total_size: metadata.len() as u32, data: data.to_vec() },
                None => PeerCommand::RejectMetadata(piece),
            },
            None => PeerCommand::RejectMetadata(piece),
        };
        if entry.command_tx.try_send(command).is_err() {
            debug!("[SESSION] {} peer #{} is not keeping up, dropped a metadata reply", self.content_hash.short(), conn_id);
        }
    }

    /// Accepts validated metadata. Parsing failures only fail the session in strict mode.
    fn install_metadata(&mut self, metadata: Vec<u8>) {
        let validation = self.config.swarm.validation;
        let mut status = match self.role {
            SessionRole::Seeding => SessionStatus::Seeding,
            SessionRole::Leeching => SessionStatus::Ready,
        };
        match TorrentInfo::parse(&metadata) {
            Ok(info) => {
                if self.display_name == PLACEHOLDER_NAME {
                    self.display_name = info.name.clone();
                }
                self.info = Some(info);
            }
            Err(e) if validation.requires_parsable_info() => {
                warn!("[SESSION] {} metadata is not a usable info dictionary: {}", self.content_hash.short(), e);
                status = SessionStatus::Errored;
            }
            Err(e) => {
                warn!("[SESSION] {} keeping metadata without file list: {}", self.content_hash.short(), e);
            }
        }
        info!("[SESSION] {} metadata ready ({} bytes), status {:?}", self.content_hash.short(), metadata.len(), status);
        self.metadata = Some(Arc::new(metadata));
        self.assembler = None;
        if self.status == SessionStatus::Paused {
            self.status_before_pause = Some(status);
        } else {
            self.status = status;
        }
    }

    fn report_progress(&mut self, progress: f64) {
        if !progress.is_finite() || self.metadata.is_none() {
            return;
        }
        self.progress = progress.clamp(0.0, 1.0);
        let next = if self.progress >= 1.0 {
            Some(SessionStatus::Seeding)
        } else if self.progress > 0.0 {
            Some(SessionStatus::Downloading)
        } else {
            None
        };
        let Some(next) = next else {
            return;
        };
        match self.status {
            SessionStatus::Errored => {}
            SessionStatus::Paused => self.status_before_pause = Some(next),
            _ => self.status = next,
        }
    }

    fn pause(&mut self) {
        if self.status == SessionStatus::Paused {
            return;
        }
        self.status_before_pause = Some(self.status);
        self.status = SessionStatus::Paused;
        for entry in self.peers.values() {
            let _ = entry.command_tx.try_send(PeerCommand::Close(CloseReason::Paused));
        }
        info!("[SESSION] {} paused, closing {} peers", self.content_hash.short(), self.peers.len());
    }

    fn resume(&mut self) {
        if self.status != SessionStatus::Paused {
            return;
        }
        self.status = self.status_before_pause.take().unwrap_or(SessionStatus::AwaitingMetadata);
        info!("[SESSION] {} resumed ({:?})", self.content_hash.short(), self.status);
        let known = self.known_peers.clone();
        self.dial_peers(known);
    }

    fn discover_peers(&mut self, peers: Vec<SocketAddr>) {
        for peer in peers.iter() {
            if !self.known_peers.contains(peer) {
                self.known_peers.push(*peer);
            }
        }
        if self.status != SessionStatus::Paused {
            self.dial_peers(peers);
        }
    }

    fn dial_peers(&mut self, peers: Vec<SocketAddr>) {
        for remote in peers {
            match self.spawn_peer(PeerTransport::Dial, remote) {
                Ok(_) => {}
                Err(SessionError::TooManyPeers(_)) => break,
                Err(_) => {}
            }
        }
    }

    fn spawn_peer(&mut self, transport: PeerTransport, remote: SocketAddr) -> Result<watch::Receiver<PeerConnection>, SessionError> {
        if self.is_cancelled() {
            return Err(SessionError::Closed);
        }
        if self.status == SessionStatus::Paused {
            return Err(SessionError::Paused);
        }
        let limit = self.config.swarm.max_peers_per_session;
        if self.peers.len() >= limit {
            return Err(SessionError::TooManyPeers(limit));
        }
        let direction = match &transport {
            PeerTransport::Stream { inbound_handshake: Some(_), .. } => ConnectionDirection::Inbound,
            _ => ConnectionDirection::Outbound,
        };
        if matches!(transport, PeerTransport::Dial) && self.peers.values().any(|entry| entry.remote == remote) {
            return Err(SessionError::DuplicatePeer(remote));
        }

        let conn_id = self.next_conn_id;
        self.next_conn_id += 1;
        let (command_tx, command_rx) = mpsc::channel(64);
        let (driver, state_rx) = PeerDriver::new(
            PeerConnection::new(conn_id, remote, direction),
            self.content_hash,
            self.local_peer_id,
            self.metadata.as_ref().map(|metadata| metadata.len() as u32),
            self.driver_config,
            self.cancel_rx.clone(),
            command_rx,
            self.events_tx.clone(),
        );
        let task = tokio::spawn(driver.run(transport));
        debug!("[SESSION] {} attached peer #{} {} ({:?})", self.content_hash.short(), conn_id, remote, direction);
        self.peers.insert(conn_id, PeerEntry {
            remote,
            state_rx: state_rx.clone(),
            command_tx,
            task,
        });
        Ok(state_rx)
    }

    /// Publishes the snapshot and, when something the catalog records changed,
    /// queues an upsert.
    fn publish(&mut self) {
        if self.is_cancelled() {
            return;
        }
        let snapshot = self.snapshot();
        let key = (
            snapshot.status,
            (snapshot.progress * 1000.0) as u64,
            snapshot.peers.len(),
            snapshot.info.is_some(),
            snapshot.display_name.clone(),
        );
        if self.last_persisted.as_ref() != Some(&key) {
            self.last_persisted = Some(key);
            if let Some(catalog_tx) = self.catalog_tx.as_ref() {
                let _ = catalog_tx.send(CatalogUpdate::Upsert(snapshot.clone()));
            }
        }
        self.snapshot_tx.send_replace(snapshot);
    }

    /// Waits for every peer task to observe the cancel signal and close.
    async fn stop(&mut self, mut events_rx: mpsc::UnboundedReceiver<(u64, PeerEvent)>) {
        let peers = std::mem::take(&mut self.peers);
        let count = peers.len();
        let mut final_states = BTreeMap::new();
        let mut tasks = Vec::with_capacity(count);
        for (conn_id, entry) in peers {
            let _ = entry.command_tx.try_send(PeerCommand::Close(CloseReason::Cancelled));
            final_states.insert(conn_id, entry.state_rx);
            tasks.push(entry.task);
        }
        if tokio::time::timeout(PEER_SHUTDOWN_GRACE, join_all(tasks)).await.is_err() {
            warn!("[SESSION] {} peers did not close in time", self.content_hash.short());
        }
        events_rx.close();
        while events_rx.try_recv().is_ok() {}

        let mut snapshot = self.snapshot();
        snapshot.peers = final_states.iter().map(|(conn_id, state_rx)| (*conn_id, state_rx.borrow().clone())).collect();
        self.snapshot_tx.send_replace(snapshot);
        info!("[SESSION] {} stopped, closed {} peers", self.content_hash.short(), count);
    }
}
