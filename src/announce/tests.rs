mod announce_tests {
    use crate::announce::enums::announce_event::AnnounceEvent;
    use crate::announce::structs::announce_request::AnnounceRequest;
    use crate::config::structs::announce_config::AnnounceConfig;
    use crate::identity::structs::info_hash::InfoHash;
    use crate::wire::structs::peer_id::PeerId;

    fn announce_config() -> AnnounceConfig {
        AnnounceConfig {
            trackers: vec!["udp://tracker.one:1337".to_string()],
            discovery_enabled: true,
            bootstrap_peers: vec!["10.0.0.1:6881".to_string(), "10.0.0.2:6881".to_string()],
            interval: 30,
            interval_jitter: 10,
            backoff_max: 900,
            timeout: 1,
        }
    }

    fn request(endpoints: Vec<String>) -> AnnounceRequest {
        AnnounceRequest {
            info_hash: InfoHash([0x10; 20]),
            peer_id: PeerId([0x20; 20]),
            port: 6881,
            event: AnnounceEvent::Started,
            endpoints,
        }
    }

    mod tracker_state_tests {
        use std::time::Duration;
        use proptest::prelude::*;
        use tokio::time::Instant;
        use crate::announce::enums::tracker_status::TrackerStatus;
        use crate::announce::structs::tracker_state::TrackerState;

        #[test]
        fn test_backoff_doubles_until_cap() {
            let base = Duration::from_secs(30);
            let cap = Duration::from_secs(900);
            let mut state = TrackerState::new("udp://a");
            let now = Instant::now();
            let delays: Vec<u64> = (0..8).map(|_| state.record_failure("boom".to_string(), base, cap, now).as_secs()).collect();
            assert_eq!(delays, vec![60, 120, 240, 480, 900, 900, 900, 900]);
            assert_eq!(state.status, TrackerStatus::Error);
            assert!(!state.is_due(now));
            assert!(state.is_due(now + Duration::from_secs(901)));
        }

        #[test]
        fn test_success_resets_streak_and_tracks_average() {
            let mut state = TrackerState::new("udp://a");
            state.record_failure("boom".to_string(), Duration::from_secs(30), Duration::from_secs(900), Instant::now());
            state.record_success(Duration::from_millis(100));
            assert_eq!(state.consecutive_failures, 0);
            assert_eq!(state.status, TrackerStatus::Active);
            assert_eq!(state.average_response_time_ms, 100.0);
            assert!(state.next_attempt.is_none());
            state.record_success(Duration::from_millis(200));
            assert!((state.average_response_time_ms - 130.0).abs() < 1e-9);
            assert!((state.success_rate() - 2.0 / 3.0).abs() < 1e-9);
            assert_eq!(state.health(Instant::now()).failure_streak, 0);
        }

        proptest! {
            #[test]
            fn prop_backoff_is_monotonic_and_capped(base in 1u64..120, cap_factor in 1u64..64, failures in 1usize..40) {
                let base = Duration::from_secs(base);
                let cap = base * cap_factor as u32;
                let mut state = TrackerState::new("udp://a");
                let now = Instant::now();
                let mut previous = Duration::ZERO;
                for _ in 0..failures {
                    let delay = state.record_failure("x".to_string(), base, cap, now);
                    prop_assert!(delay <= cap);
                    if previous < cap {
                        prop_assert!(delay > previous || delay == cap);
                    } else {
                        prop_assert_eq!(delay, cap);
                    }
                    previous = delay;
                }
            }
        }
    }

    mod coordinator_tests {
        use std::net::SocketAddr;
        use std::sync::Arc;
        use std::time::Duration;
        use tokio::sync::{mpsc, watch, Notify};
        use crate::announce::enums::announce_error::AnnounceError;
        use crate::announce::enums::tracker_status::TrackerStatus;
        use crate::announce::impls::static_peer_discovery::DISCOVERY_ENDPOINT;
        use crate::announce::structs::announce_coordinator::AnnounceCoordinator;
        use crate::announce::traits::announce_backend::{AnnounceBackend, MockAnnounceBackend};
        use super::{announce_config, request};

        fn failing_backend() -> MockAnnounceBackend {
            let mut backend = MockAnnounceBackend::new();
            backend.expect_handles().returning(|endpoint| endpoint.starts_with("udp://"));
            backend.expect_announce().times(1).returning(|_, _| Err(AnnounceError::Backend("unreachable".to_string())));
            backend
        }

        #[tokio::test]
        async fn test_static_discovery_returns_bootstrap_peers() {
            let coordinator = AnnounceCoordinator::new(&announce_config());
            let peers = coordinator.announce(&request(coordinator.default_endpoints())).await;
            let expected: Vec<SocketAddr> = vec!["10.0.0.1:6881".parse().unwrap(), "10.0.0.2:6881".parse().unwrap()];
            assert_eq!(peers, expected);

            let states = coordinator.get_tracker_states();
            let discovery = states.iter().find(|state| state.url == DISCOVERY_ENDPOINT).unwrap();
            assert_eq!(discovery.status, TrackerStatus::Active);
            let tracker = states.iter().find(|state| state.url == "udp://tracker.one:1337").unwrap();
            assert_eq!(tracker.status, TrackerStatus::Unknown);
        }

        #[tokio::test]
        async fn test_failing_endpoint_is_skipped_while_backing_off() {
            let backend: Arc<dyn AnnounceBackend> = Arc::new(failing_backend());
            let coordinator = AnnounceCoordinator::with_backends(&announce_config(), vec![backend]);
            let endpoints = vec!["udp://tracker.one:1337".to_string()];
            assert!(coordinator.announce(&request(endpoints.clone())).await.is_empty());
            // The mock allows one call only; the second round must not reach it.
            assert!(coordinator.announce(&request(endpoints)).await.is_empty());

            let health = coordinator.get_tracker_health();
            let tracker = health.iter().find(|entry| entry.state.url == "udp://tracker.one:1337").unwrap();
            assert_eq!(tracker.failure_streak, 1);
            assert_eq!(tracker.success_rate, 0.0);
            assert!(tracker.retry_in_secs.unwrap() >= 59);
            assert_eq!(tracker.state.last_error.as_deref(), Some("announce failed: unreachable"));
        }

        #[tokio::test]
        async fn test_hint_endpoints_are_registered() {
            let coordinator = AnnounceCoordinator::new(&announce_config());
            coordinator.announce(&request(vec!["https://hint.example/announce".to_string()])).await;
            assert!(coordinator.get_tracker_states().iter().any(|state| state.url == "https://hint.example/announce"));
        }

        #[tokio::test]
        async fn test_schedule_forwards_peers_and_stops_on_cancel() {
            let coordinator = Arc::new(AnnounceCoordinator::new(&announce_config()));
            let (peers_tx, mut peers_rx) = mpsc::channel(4);
            let (cancel_tx, cancel_rx) = watch::channel(false);
            let find_more = Arc::new(Notify::new());
            let handle = coordinator.spawn_schedule(request(coordinator.default_endpoints()), peers_tx, find_more.clone(), cancel_rx);

            let first = tokio::time::timeout(Duration::from_secs(5), peers_rx.recv()).await.unwrap().unwrap();
            assert_eq!(first.len(), 2);
            find_more.notify_one();
            let second = tokio::time::timeout(Duration::from_secs(5), peers_rx.recv()).await.unwrap().unwrap();
            assert_eq!(second.len(), 2);

            cancel_tx.send(true).unwrap();
            tokio::time::timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
        }
    }
}
