mod catalog_tests {
    mod record_tests {
        use crate::catalog::structs::catalog_record::CatalogRecord;
        use crate::metadata::metadata::hash_metadata;
        use crate::session::enums::session_status::SessionStatus;
        use crate::session::structs::ensure_options::EnsureOptions;
        use crate::session::tests::{sample_info, test_config, test_registry};

        #[tokio::test]
        async fn test_record_from_snapshot() {
            let dir = tempfile::tempdir().unwrap();
            let registry = test_registry(test_config(dir.path()), None);
            let metadata = sample_info("record.bin", 1);
            let handle = registry.ensure_session(&hash_metadata(&metadata).to_hex(), EnsureOptions::seeding(metadata.clone())).await.unwrap();

            let record = CatalogRecord::from_snapshot(&handle.snapshot());
            assert_eq!(record.content_hash, handle.content_hash());
            assert_eq!(record.display_name, "record.bin");
            assert_eq!(record.size, 4096);
            assert_eq!(record.files.len(), 1);
            assert_eq!(record.files[0].path, "record.bin");
            assert_eq!(record.status.state, SessionStatus::Seeding);
            assert_eq!(record.decode_metadata(), Some(metadata));

            let json = serde_json::to_value(&record).unwrap();
            assert!(json.get("contentHash").is_some());
            assert!(json.get("sourceURI").is_some());
            assert_eq!(json["status"]["state"], "Seeding");
            registry.shutdown_all().await;
        }

        #[tokio::test]
        async fn test_record_without_metadata() {
            let dir = tempfile::tempdir().unwrap();
            let registry = test_registry(test_config(dir.path()), None);
            let handle = registry.ensure_session("c12fe1c06bba254a9dc9f519b335aa7c1367a88a", EnsureOptions::default()).await.unwrap();
            let record = CatalogRecord::from_snapshot(&handle.snapshot());
            assert_eq!(record.size, 0);
            assert!(record.files.is_empty());
            assert!(record.metadata.is_none());
            assert!(!serde_json::to_string(&record).unwrap().contains("\"metadata\""));
            registry.shutdown_all().await;
        }
    }

    mod json_catalog_tests {
        use chrono::Utc;
        use crate::catalog::errors::CatalogError;
        use crate::catalog::structs::catalog_record::CatalogRecord;
        use crate::catalog::structs::catalog_status::CatalogStatus;
        use crate::catalog::structs::json_catalog::JsonCatalog;
        use crate::catalog::traits::catalog_backend::CatalogBackend;
        use crate::identity::structs::info_hash::InfoHash;
        use crate::session::enums::session_role::SessionRole;
        use crate::session::enums::session_status::SessionStatus;

        fn record(byte: u8) -> CatalogRecord {
            let content_hash = InfoHash([byte; 20]);
            CatalogRecord {
                content_hash,
                display_name: format!("item-{byte}"),
                source_uri: format!("magnet:?xt=urn:btih:{}", content_hash.to_hex()),
                size: 0,
                files: vec![],
                status: CatalogStatus { progress: 0.0, peers: 0, state: SessionStatus::AwaitingMetadata },
                created: Utc::now(),
                role: SessionRole::Leeching,
                metadata: None,
            }
        }

        #[tokio::test]
        async fn test_records_survive_reopening() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("catalog.json");
            let catalog = JsonCatalog::new(&path);
            assert!(catalog.load_records().await.unwrap().is_empty());

            catalog.upsert(&record(1)).await.unwrap();
            catalog.upsert(&record(2)).await.unwrap();
            let mut renamed = record(1);
            renamed.display_name = "renamed".to_string();
            catalog.upsert(&renamed).await.unwrap();

            let reopened = JsonCatalog::new(&path);
            let records = reopened.load_records().await.unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(records.iter().find(|r| r.content_hash == InfoHash([1; 20])).map(|r| r.display_name.as_str()), Some("renamed"));
            assert!(!dir.path().join("nested").join("catalog.json.tmp").exists());
        }

        #[tokio::test]
        async fn test_remove_reports_existence() {
            let dir = tempfile::tempdir().unwrap();
            let catalog = JsonCatalog::new(dir.path().join("catalog.json"));
            catalog.upsert(&record(3)).await.unwrap();
            assert!(catalog.remove(&InfoHash([3; 20])).await.unwrap());
            assert!(!catalog.remove(&InfoHash([3; 20])).await.unwrap());
            assert!(JsonCatalog::new(dir.path().join("catalog.json")).load_records().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_corrupt_file_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("catalog.json");
            std::fs::write(&path, b"{ not json").unwrap();
            let result = JsonCatalog::new(&path).load_records().await;
            assert!(matches!(result, Err(CatalogError::SerializationError(_))));
        }
    }

    mod reconciler_tests {
        use std::sync::Arc;
        use std::time::Duration;
        use tokio::sync::{mpsc, watch};
        use crate::catalog::enums::catalog_update::CatalogUpdate;
        use crate::catalog::errors::CatalogError;
        use crate::catalog::structs::catalog_reconciler::CatalogReconciler;
        use crate::catalog::structs::catalog_record::CatalogRecord;
        use crate::catalog::structs::memory_catalog::MemoryCatalog;
        use crate::catalog::structs::repair_report::RepairReport;
        use crate::catalog::traits::catalog_backend::{CatalogBackend, MockCatalogBackend};
        use crate::metadata::metadata::hash_metadata;
        use crate::session::enums::session_status::SessionStatus;
        use crate::session::structs::ensure_options::EnsureOptions;
        use crate::session::tests::{sample_info, test_config, test_registry};

        #[tokio::test]
        async fn test_failed_upsert_is_retried() {
            let dir = tempfile::tempdir().unwrap();
            let registry = test_registry(test_config(dir.path()), None);
            let handle = registry.ensure_session("c12fe1c06bba254a9dc9f519b335aa7c1367a88a", EnsureOptions::default()).await.unwrap();

            let mut backend = MockCatalogBackend::new();
            let mut seq = mockall::Sequence::new();
            backend.expect_upsert().times(1).in_sequence(&mut seq).returning(|_| Err(CatalogError::Unavailable("offline".to_string())));
            backend.expect_upsert().times(1).in_sequence(&mut seq).returning(|_| Ok(()));
            let reconciler = CatalogReconciler::new(Arc::new(backend), registry.clone());

            assert!(!reconciler.on_session_changed(&handle.snapshot()).await);
            assert_eq!(reconciler.pending_count(), 1);
            assert_eq!(reconciler.flush_pending().await, 1);
            assert_eq!(reconciler.pending_count(), 0);
            registry.shutdown_all().await;
        }

        #[tokio::test]
        async fn test_failed_removal_stays_pending() {
            let dir = tempfile::tempdir().unwrap();
            let registry = test_registry(test_config(dir.path()), None);
            let mut backend = MockCatalogBackend::new();
            backend.expect_remove().times(2).returning(|_| Err(CatalogError::Unavailable("offline".to_string())));
            let reconciler = CatalogReconciler::new(Arc::new(backend), registry);

            let hash = "c12fe1c06bba254a9dc9f519b335aa7c1367a88a".parse().unwrap();
            assert!(!reconciler.apply(CatalogUpdate::Remove(hash)).await);
            assert_eq!(reconciler.flush_pending().await, 0);
            assert_eq!(reconciler.pending_count(), 1);
        }

        #[tokio::test]
        async fn test_reload_restores_sessions() {
            let dir = tempfile::tempdir().unwrap();
            let metadata = sample_info("persisted.bin", 1);
            let hash = hash_metadata(&metadata);
            let catalog = Arc::new(MemoryCatalog::default());

            {
                let registry = test_registry(test_config(dir.path()), None);
                let handle = registry.ensure_session(&hash.to_hex(), EnsureOptions::with_metadata(metadata.clone())).await.unwrap();
                handle.report_progress(0.25).await.unwrap();
                let snapshot = handle.wait_for_status(SessionStatus::Downloading, Duration::from_secs(5)).await.unwrap();
                catalog.upsert(&CatalogRecord::from_snapshot(&snapshot)).await.unwrap();
                let pending = registry.ensure_session("c12fe1c06bba254a9dc9f519b335aa7c1367a88a", EnsureOptions::default()).await.unwrap();
                catalog.upsert(&CatalogRecord::from_snapshot(&pending.snapshot())).await.unwrap();
                registry.shutdown_all().await;
            }

            let registry = test_registry(test_config(dir.path()), None);
            let reconciler = CatalogReconciler::new(catalog.clone(), registry.clone());
            assert_eq!(reconciler.reload_from_catalog().await.unwrap(), 2);
            assert_eq!(registry.len(), 2);

            let restored = registry.get(&hash).unwrap();
            let snapshot = restored.wait_for_status(SessionStatus::Downloading, Duration::from_secs(5)).await.unwrap();
            assert_eq!(snapshot.display_name, "persisted.bin");
            assert_eq!(snapshot.progress, 0.25);
            assert_eq!(snapshot.metadata.as_deref(), Some(&metadata));
            registry.shutdown_all().await;
        }

        #[tokio::test]
        async fn test_reload_survives_stale_metadata() {
            let dir = tempfile::tempdir().unwrap();
            let registry = test_registry(test_config(dir.path()), None);
            let handle = registry.ensure_session("c12fe1c06bba254a9dc9f519b335aa7c1367a88a", EnsureOptions::default()).await.unwrap();
            let mut record = CatalogRecord::from_snapshot(&handle.snapshot());
            registry.remove(&handle.content_hash(), false).await;
            record.metadata = Some("bm90IHRoZSBpbmZvIGRpY3Q=".to_string());

            let catalog = Arc::new(MemoryCatalog::default());
            catalog.upsert(&record).await.unwrap();
            let reconciler = CatalogReconciler::new(catalog, registry.clone());
            assert_eq!(reconciler.reload_from_catalog().await.unwrap(), 1);
            assert_eq!(registry.get(&record.content_hash).map(|h| h.status()), Some(SessionStatus::AwaitingMetadata));
            registry.shutdown_all().await;
        }

        #[tokio::test]
        async fn test_repair_closes_both_gaps() {
            let dir = tempfile::tempdir().unwrap();
            let registry = test_registry(test_config(dir.path()), None);
            let catalog = Arc::new(MemoryCatalog::default());

            let orphan = registry.ensure_session("0000000000000000000000000000000000000001", EnsureOptions::default()).await.unwrap();
            catalog.upsert(&CatalogRecord::from_snapshot(&orphan.snapshot())).await.unwrap();
            registry.remove(&orphan.content_hash(), false).await;
            let live = registry.ensure_session("0000000000000000000000000000000000000002", EnsureOptions::default()).await.unwrap();

            let reconciler = CatalogReconciler::new(catalog.clone(), registry.clone());
            assert_eq!(reconciler.repair().await.unwrap(), RepairReport { upserted: 1, removed: 1 });
            let records = catalog.load_records().await.unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].content_hash, live.content_hash());
            assert_eq!(reconciler.repair().await.unwrap(), RepairReport::default());
            registry.shutdown_all().await;
        }

        #[tokio::test]
        async fn test_run_applies_updates_queued_before_shutdown() {
            let dir = tempfile::tempdir().unwrap();
            let (catalog_tx, catalog_rx) = mpsc::unbounded_channel();
            let registry = test_registry(test_config(dir.path()), Some(catalog_tx));
            let catalog = Arc::new(MemoryCatalog::default());
            let reconciler = Arc::new(CatalogReconciler::new(catalog.clone(), registry.clone()));
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let task = tokio::spawn(reconciler.run(catalog_rx, shutdown_rx, Duration::from_secs(60), Duration::from_secs(60)));

            let first = registry.ensure_session("0000000000000000000000000000000000000003", EnsureOptions::default()).await.unwrap();
            let second = registry.ensure_session("0000000000000000000000000000000000000004", EnsureOptions::default()).await.unwrap();
            tokio::time::timeout(Duration::from_secs(5), async {
                while !catalog.load_records().await.unwrap().iter().any(|record| record.content_hash == first.content_hash()) {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }).await.unwrap();
            registry.remove(&second.content_hash(), false).await;
            registry.shutdown_all().await;

            shutdown_tx.send(true).unwrap();
            task.await.unwrap();
            let records = catalog.load_records().await.unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].content_hash, first.content_hash());
        }
    }
}
