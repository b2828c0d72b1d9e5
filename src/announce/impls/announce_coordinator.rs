use std::collections::{BTreeMap, BTreeSet};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use futures_util::future::join_all;
use log::{debug, info, warn};
use parking_lot::RwLock;
use rand::RngExt;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use crate::common::common::flag_raised;
use crate::announce::enums::announce_error::AnnounceError;
use crate::announce::enums::announce_event::AnnounceEvent;
use crate::announce::impls::static_peer_discovery::DISCOVERY_ENDPOINT;
use crate::announce::structs::announce_coordinator::AnnounceCoordinator;
use crate::announce::structs::announce_request::AnnounceRequest;
use crate::announce::structs::static_peer_discovery::StaticPeerDiscovery;
use crate::announce::structs::tracker_health::TrackerHealth;
use crate::announce::structs::tracker_state::TrackerState;
use crate::announce::traits::announce_backend::AnnounceBackend;
use crate::config::structs::announce_config::AnnounceConfig;

impl AnnounceCoordinator {
    /// Coordinator with the bundled backends: static discovery when enabled.
    pub fn new(config: &AnnounceConfig) -> AnnounceCoordinator {
        let mut backends: Vec<Arc<dyn AnnounceBackend>> = Vec::new();
        if config.discovery_enabled {
            backends.push(Arc::new(StaticPeerDiscovery::from_config(&config.bootstrap_peers)));
        }
        AnnounceCoordinator::with_backends(config, backends)
    }

    pub fn with_backends(config: &AnnounceConfig, backends: Vec<Arc<dyn AnnounceBackend>>) -> AnnounceCoordinator {
        let coordinator = AnnounceCoordinator {
            config: config.clone(),
            trackers: RwLock::new(BTreeMap::new()),
            backends,
        };
        coordinator.register_endpoints(&coordinator.default_endpoints());
        coordinator
    }

    /// Configured trackers plus the discovery endpoint when enabled.
    pub fn default_endpoints(&self) -> Vec<String> {
        let mut endpoints = self.config.trackers.clone();
        if self.config.discovery_enabled {
            endpoints.push(DISCOVERY_ENDPOINT.to_string());
        }
        endpoints
    }

    /// Starts tracking `endpoints`; already known ones keep their state.
    pub fn register_endpoints(&self, endpoints: &[String]) {
        let mut trackers = self.trackers.write();
        for endpoint in endpoints {
            trackers.entry(endpoint.clone()).or_insert_with(|| TrackerState::new(endpoint));
        }
    }

    fn base_interval(&self) -> Duration {
        Duration::from_secs(self.config.interval.max(1))
    }

    fn backoff_cap(&self) -> Duration {
        Duration::from_secs(self.config.backoff_max.max(self.config.interval).max(1))
    }

    fn backend_for(&self, endpoint: &str) -> Option<Arc<dyn AnnounceBackend>> {
        self.backends.iter().find(|backend| backend.handles(endpoint)).cloned()
    }

    /// Announces to every due endpoint of `request` concurrently and returns the
    /// de-duplicated peers. Endpoints in backoff are skipped; endpoints without a
    /// backend stay `Unknown`.
    #[tracing::instrument(level = "debug", skip(self, request), fields(info_hash = %request.info_hash.short()))]
    pub async fn announce(&self, request: &AnnounceRequest) -> Vec<SocketAddr> {
        self.register_endpoints(&request.endpoints);
        let now = Instant::now();
        let due: Vec<(String, Arc<dyn AnnounceBackend>)> = {
            let mut trackers = self.trackers.write();
            request.endpoints.iter()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .filter_map(|endpoint| {
                    let backend = self.backend_for(endpoint)?;
                    let state = trackers.get_mut(endpoint)?;
                    if !state.is_due(now) {
                        return None;
                    }
                    state.record_attempt();
                    Some((endpoint.clone(), backend))
                })
                .collect()
        };
        if due.is_empty() {
            return Vec::new();
        }

        let timeout = Duration::from_secs(self.config.timeout.max(1));
        let attempts = due.iter().map(|(endpoint, backend)| async move {
            let started = Instant::now();
            let result = match tokio::time::timeout(timeout, backend.announce(endpoint, request)).await {
                Ok(result) => result,
                Err(_) => Err(AnnounceError::Timeout(timeout.as_secs())),
            };
            (endpoint.clone(), started.elapsed(), result)
        });
        let results = join_all(attempts).await;

        let mut peers = BTreeSet::new();
        let base = self.base_interval();
        let cap = self.backoff_cap();
        let now = Instant::now();
        let mut trackers = self.trackers.write();
        for (endpoint, elapsed, result) in results {
            let Some(state) = trackers.get_mut(&endpoint) else {
                continue;
            };
            match result {
                Ok(found) => {
                    debug!("[ANNOUNCE] {} returned {} peers in {}ms", endpoint, found.len(), elapsed.as_millis());
                    state.record_success(elapsed);
                    peers.extend(found);
                }
                Err(error) => {
                    let delay = state.record_failure(error.to_string(), base, cap, now);
                    warn!("[ANNOUNCE] {} failed ({} in a row), retrying in {}s: {}", endpoint, state.consecutive_failures, delay.as_secs(), error);
                }
            }
        }
        peers.into_iter().collect()
    }

    pub fn get_tracker_states(&self) -> Vec<TrackerState> {
        self.trackers.read().values().cloned().collect()
    }

    pub fn get_tracker_health(&self) -> Vec<TrackerHealth> {
        let now = Instant::now();
        self.trackers.read().values().map(|state| state.health(now)).collect()
    }

    /// Base interval plus up to `interval_jitter` random seconds.
    pub fn next_delay(&self) -> Duration {
        let jitter = if self.config.interval_jitter > 0 {
            rand::rng().random_range(0..=self.config.interval_jitter)
        } else {
            0
        };
        self.base_interval() + Duration::from_secs(jitter)
    }

    /// Announces on creation, then on a jittered interval and whenever `find_more` is
    /// notified. Stops once `cancel_rx` flips and, if anything was announced, sends a
    /// final `Stopped` round. Discovered peers are only forwarded while the session is
    /// still live.
    pub fn spawn_schedule(
        self: &Arc<Self>,
        mut request: AnnounceRequest,
        peers_tx: mpsc::Sender<Vec<SocketAddr>>,
        find_more: Arc<Notify>,
        mut cancel_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        self.register_endpoints(&request.endpoints);
        let coordinator = self.clone();
        tokio::spawn(async move {
            info!("[ANNOUNCE] schedule started for {} ({} endpoints)", request.info_hash.short(), request.endpoints.len());
            let mut announced = false;
            loop {
                if *cancel_rx.borrow() {
                    break;
                }
                let peers = tokio::select! {
                    biased;
                    _ = flag_raised(&mut cancel_rx) => break,
                    peers = coordinator.announce(&request) => peers,
                };
                announced = true;
                if *cancel_rx.borrow() {
                    break;
                }
                if !peers.is_empty() && peers_tx.send(peers).await.is_err() {
                    break;
                }
                request.event = AnnounceEvent::None;

                let delay = coordinator.next_delay();
                tokio::select! {
                    biased;
                    _ = flag_raised(&mut cancel_rx) => break,
                    _ = find_more.notified() => {
                        debug!("[ANNOUNCE] {} asked for more peers", request.info_hash.short());
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            if announced {
                request.event = AnnounceEvent::Stopped;
                coordinator.announce(&request).await;
            }
            debug!("[ANNOUNCE] schedule stopped for {}", request.info_hash.short());
        })
    }
}
