mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use tokio::net::TcpListener;
use magnet_swarm::announce::enums::announce_error::AnnounceError;
use magnet_swarm::announce::enums::announce_event::AnnounceEvent;
use magnet_swarm::announce::enums::tracker_status::TrackerStatus;
use magnet_swarm::announce::structs::announce_coordinator::AnnounceCoordinator;
use magnet_swarm::announce::structs::announce_request::AnnounceRequest;
use magnet_swarm::announce::traits::announce_backend::AnnounceBackend;
use magnet_swarm::metadata::metadata::hash_metadata;
use magnet_swarm::session::enums::session_status::SessionStatus;
use magnet_swarm::session::structs::ensure_options::EnsureOptions;
use magnet_swarm::session::structs::session_registry::SessionRegistry;
use common::FakePeerMode;

const UP: &str = "udp://up.example:6969";
const DOWN: &str = "udp://down.example:6969";

/// Answers `UP` with a fixed peer list and fails every other endpoint.
struct ScriptedBackend {
    peers: Vec<SocketAddr>,
    calls: AtomicUsize,
}

#[async_trait]
impl AnnounceBackend for ScriptedBackend {
    fn handles(&self, endpoint: &str) -> bool {
        endpoint.starts_with("udp://")
    }

    async fn announce(&self, endpoint: &str, _request: &AnnounceRequest) -> Result<Vec<SocketAddr>, AnnounceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if endpoint == UP {
            Ok(self.peers.clone())
        } else {
            Err(AnnounceError::Backend("connection refused".to_string()))
        }
    }
}

fn request() -> AnnounceRequest {
    AnnounceRequest {
        info_hash: common::random_info_hash(),
        peer_id: common::random_peer_id(),
        port: 6881,
        event: AnnounceEvent::Started,
        endpoints: vec![UP.to_string(), DOWN.to_string()],
    }
}

#[tokio::test]
async fn test_failing_tracker_backs_off_without_affecting_others() {
    let dir = common::create_temp_dir();
    let config = common::create_test_config(&dir);
    let backend = Arc::new(ScriptedBackend { peers: vec!["10.9.9.9:6881".parse().unwrap()], calls: AtomicUsize::new(0) });
    let coordinator = AnnounceCoordinator::with_backends(&config.announce, vec![backend.clone()]);

    let peers = coordinator.announce(&request()).await;
    assert_eq!(peers, vec!["10.9.9.9:6881".parse::<SocketAddr>().unwrap()]);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);

    let health = coordinator.get_tracker_health();
    let down = health.iter().find(|h| h.state.url == DOWN).unwrap();
    assert_eq!(down.state.status, TrackerStatus::Error);
    assert_eq!(down.failure_streak, 1);
    assert!(down.retry_in_secs.unwrap() > 0);
    let up = health.iter().find(|h| h.state.url == UP).unwrap();
    assert_eq!(up.state.status, TrackerStatus::Active);
    assert_eq!(up.success_rate, 1.0);

    coordinator.announce(&request()).await;
    assert_eq!(backend.calls.load(Ordering::SeqCst), 3, "the failing tracker must be skipped while backing off");
    let states = coordinator.get_tracker_states();
    assert_eq!(states.iter().find(|s| s.url == UP).map(|s| s.successes), Some(2));
    assert_eq!(states.iter().find(|s| s.url == DOWN).map(|s| s.consecutive_failures), Some(1));
}

#[tokio::test]
async fn test_announced_peers_are_dialled() {
    let dir = common::create_temp_dir();
    let metadata = common::create_info_dict("announced.bin", 50);
    let hash = hash_metadata(&metadata);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let served = metadata.clone();
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            common::run_fake_peer(stream, hash, served, FakePeerMode::Honest, false).await;
        }
    });

    let mut config = common::create_test_config(&dir);
    config.announce.trackers = vec![UP.to_string()];
    let backend = Arc::new(ScriptedBackend { peers: vec![address], calls: AtomicUsize::new(0) });
    let coordinator = Arc::new(AnnounceCoordinator::with_backends(&config.announce, vec![backend]));
    let registry = Arc::new(SessionRegistry::new(Arc::new(config), coordinator, None));

    let handle = registry.ensure_session(&hash.to_hex(), EnsureOptions::default()).await.unwrap();
    let snapshot = handle.wait_for_status(SessionStatus::Ready, Duration::from_secs(10)).await.unwrap();
    assert_eq!(snapshot.metadata.as_deref(), Some(&metadata));
    assert!(snapshot.peers.values().any(|peer| peer.remote == address));
    registry.shutdown_all().await;
}

#[tokio::test]
async fn test_find_more_peers_announces_outside_the_schedule() {
    let dir = common::create_temp_dir();
    let mut config = common::create_test_config(&dir);
    config.announce.trackers = vec![UP.to_string()];
    let backend = Arc::new(ScriptedBackend { peers: vec![], calls: AtomicUsize::new(0) });
    let coordinator = Arc::new(AnnounceCoordinator::with_backends(&config.announce, vec![backend.clone()]));
    let registry = Arc::new(SessionRegistry::new(Arc::new(config), coordinator, None));
    let handle = registry.ensure_session(&common::random_info_hash().to_hex(), EnsureOptions::default()).await.unwrap();

    let wait_for_calls = |expected: usize| {
        let backend = backend.clone();
        async move {
            while backend.calls.load(Ordering::SeqCst) < expected {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait_for_calls(1)).await.unwrap();
    handle.find_more_peers();
    tokio::time::timeout(Duration::from_secs(5), wait_for_calls(2)).await.unwrap();
    registry.shutdown_all().await;
}
