use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use chrono::Utc;
use futures_util::future::join_all;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use tokio::sync::{mpsc, watch, Notify};
use crate::announce::enums::announce_event::AnnounceEvent;
use crate::announce::structs::announce_coordinator::AnnounceCoordinator;
use crate::announce::structs::announce_request::AnnounceRequest;
use crate::catalog::enums::catalog_update::CatalogUpdate;
use crate::common::common::generate_peer_id;
use crate::config::structs::configuration::Configuration;
use crate::identity::impls::identity_resolver::PLACEHOLDER_NAME;
use crate::identity::structs::identity_resolver::IdentityResolver;
use crate::identity::structs::info_hash::InfoHash;
use crate::identity::structs::resolved_identity::ResolvedIdentity;
use crate::metadata::metadata::verify_metadata;
use crate::metadata::structs::metadata_assembler::MetadataAssembler;
use crate::metadata::structs::metadata_assembler_config::MetadataAssemblerConfig;
use crate::metadata::structs::torrent_info::TorrentInfo;
use crate::peer::structs::peer_driver_config::PeerDriverConfig;
use crate::session::enums::session_error::SessionError;
use crate::session::enums::session_role::SessionRole;
use crate::session::enums::session_status::SessionStatus;
use crate::session::structs::ensure_options::EnsureOptions;
use crate::session::structs::session_handle::SessionHandle;
use crate::session::structs::session_registry::SessionRegistry;
use crate::session::structs::session_shared::SessionShared;
use crate::session::structs::session_snapshot::SessionSnapshot;
use crate::session::structs::torrent_session::TorrentSession;

const DEFAULT_PORT: u16 = 6881;

impl SessionRegistry {
    pub fn new(config: Arc<Configuration>, coordinator: Arc<AnnounceCoordinator>, catalog_tx: Option<mpsc::UnboundedSender<CatalogUpdate>>) -> SessionRegistry {
        let peer_id = generate_peer_id(&config.swarm.peer_id_prefix);
        SessionRegistry {
            config,
            sessions: RwLock::new(BTreeMap::new()),
            coordinator,
            peer_id,
            catalog_tx,
        }
    }

    /// Returns the session for `identifier`, creating it on first use.
    ///
    /// The identifier is resolved before taking the lock; creation and insertion then
    /// happen under one write lock, so concurrent calls for the same content hash always
    /// end up with the same session and only its creator starts an announce schedule.
    #[tracing::instrument(level = "debug", skip(self, options))]
    pub async fn ensure_session(&self, identifier: &str, options: EnsureOptions) -> Result<SessionHandle, SessionError> {
        let resolved = IdentityResolver::resolve_with(identifier, self.config.swarm.validation)?;
        let metadata = match options.metadata {
            Some(metadata) if verify_metadata(&resolved.info_hash, &metadata) => Some(Arc::new(metadata)),
            Some(_) => {
                warn!("[SESSION] {} supplied metadata failed the hash check", resolved.info_hash.short());
                return Err(SessionError::MetadataMismatch);
            }
            None => None,
        };

        let (handle, created) = {
            let mut sessions = self.sessions.write();
            match sessions.get(&resolved.info_hash) {
                Some(existing) => (existing.clone(), false),
                None => {
                    let handle = self.spawn_session(&resolved, options.role, metadata.clone());
                    sessions.insert(resolved.info_hash, handle.clone());
                    (handle, true)
                }
            }
        };

        if created {
            info!("[SESSION] {} created for '{}'", resolved.info_hash.short(), resolved.display_name);
        } else {
            debug!("[SESSION] {} already exists, returning it", resolved.info_hash.short());
            if let Some(metadata) = metadata {
                if !handle.snapshot().has_metadata() {
                    let _ = handle.provide_metadata(metadata).await;
                }
            }
        }
        Ok(handle)
    }

    fn spawn_session(&self, resolved: &ResolvedIdentity, role: SessionRole, metadata: Option<Arc<Vec<u8>>>) -> SessionHandle {
        let config = self.config.clone();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (command_tx, command_rx) = mpsc::channel(64);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (peers_tx, peers_rx) = mpsc::channel(16);
        let find_more = Arc::new(Notify::new());

        let mut display_name = resolved.display_name.clone();
        let mut status = SessionStatus::AwaitingMetadata;
        let mut info = None;
        let mut assembler = None;
        match metadata.as_ref() {
            Some(metadata) => {
                status = match role {
                    SessionRole::Seeding => SessionStatus::Seeding,
                    SessionRole::Leeching => SessionStatus::Ready,
                };
                match TorrentInfo::parse(metadata) {
                    Ok(parsed) => {
                        if display_name == PLACEHOLDER_NAME {
                            display_name = parsed.name.clone();
                        }
                        info = Some(parsed);
                    }
                    Err(e) if config.swarm.validation.requires_parsable_info() => {
                        warn!("[SESSION] {} supplied metadata is not a usable info dictionary: {}", resolved.info_hash.short(), e);
                        status = SessionStatus::Errored;
                    }
                    Err(e) => warn!("[SESSION] {} keeping supplied metadata without file list: {}", resolved.info_hash.short(), e),
                }
            }
            None => {
                assembler = Some(MetadataAssembler::new(resolved.info_hash, MetadataAssemblerConfig::from_swarm(&config.swarm)));
            }
        }

        let session = TorrentSession {
            content_hash: resolved.info_hash,
            display_name,
            source_uri: resolved.source_uri.clone(),
            role,
            status,
            progress: 0.0,
            created: Utc::now(),
            metadata,
            info,
            assembler,
            peers: BTreeMap::new(),
            known_peers: resolved.peers.clone(),
            config: config.clone(),
            local_peer_id: self.peer_id,
            driver_config: PeerDriverConfig::from_swarm(&config.swarm),
            status_before_pause: None,
            metadata_failures: 0,
            next_conn_id: 1,
            cancel_rx: cancel_rx.clone(),
            events_tx,
            snapshot_tx: watch::Sender::new(Self::placeholder_snapshot(resolved)),
            catalog_tx: self.catalog_tx.clone(),
            last_persisted: None,
        };
        let snapshot_rx = {
            let initial = session.snapshot();
            session.snapshot_tx.send_replace(initial);
            session.snapshot_tx.subscribe()
        };
        let created = session.created;

        let mut endpoints = self.coordinator.default_endpoints();
        for tracker in resolved.trackers.iter() {
            if !endpoints.contains(tracker) {
                endpoints.push(tracker.clone());
            }
        }
        let request = AnnounceRequest {
            info_hash: resolved.info_hash,
            peer_id: self.peer_id,
            port: self.listen_port(),
            event: AnnounceEvent::Started,
            endpoints,
        };

        let actor = tokio::spawn(session.run(command_rx, events_rx, peers_rx));
        let schedule = self.coordinator.spawn_schedule(request, peers_tx, find_more.clone(), cancel_rx);

        SessionHandle {
            shared: Arc::new(SessionShared {
                content_hash: resolved.info_hash,
                source_uri: resolved.source_uri.clone(),
                created,
                command_tx,
                snapshot_rx,
                cancel_tx,
                find_more,
                tasks: Mutex::new(vec![actor, schedule]),
            }),
        }
    }

    fn placeholder_snapshot(resolved: &ResolvedIdentity) -> SessionSnapshot {
        SessionSnapshot {
            content_hash: resolved.info_hash,
            display_name: resolved.display_name.clone(),
            source_uri: resolved.source_uri.clone(),
            role: SessionRole::Leeching,
            status: SessionStatus::AwaitingMetadata,
            progress: 0.0,
            peers: BTreeMap::new(),
            metadata: None,
            info: None,
            metadata_size: None,
            metadata_failures: 0,
            created: Utc::now(),
        }
    }

    pub fn listen_port(&self) -> u16 {
        self.config.swarm.listen_address
            .parse::<std::net::SocketAddr>()
            .map(|address| address.port())
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn get(&self, content_hash: &InfoHash) -> Option<SessionHandle> {
        self.sessions.read().get(content_hash).cloned()
    }

    pub fn list(&self) -> Vec<SessionHandle> {
        self.sessions.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn storage_path(&self, content_hash: &InfoHash) -> PathBuf {
        PathBuf::from(&self.config.storage.root).join(content_hash.to_hex())
    }

    /// Removes a session: it leaves the map first, then its peers, announce schedule
    /// and actor are cancelled and awaited. Returns false for unknown hashes.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn remove(&self, content_hash: &InfoHash, purge_data: bool) -> bool {
        let Some(handle) = self.sessions.write().remove(content_hash) else {
            return false;
        };
        handle.shutdown().await;

        if purge_data {
            let path = self.storage_path(content_hash);
            match tokio::fs::remove_dir_all(&path).await {
                Ok(()) => info!("[SESSION] {} purged {}", content_hash.short(), path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("[SESSION] {} could not purge {}: {}", content_hash.short(), path.display(), e),
            }
        }
        if let Some(catalog_tx) = self.catalog_tx.as_ref() {
            let _ = catalog_tx.send(CatalogUpdate::Remove(*content_hash));
        }
        info!("[SESSION] {} removed", content_hash.short());
        true
    }

    /// Stops every session without touching the catalog.
    pub async fn shutdown_all(&self) {
        let handles: Vec<SessionHandle> = {
            let mut sessions = self.sessions.write();
            std::mem::take(&mut *sessions).into_values().collect()
        };
        info!("[SESSION] stopping {} sessions", handles.len());
        join_all(handles.iter().map(|handle| handle.shutdown())).await;
    }
}
