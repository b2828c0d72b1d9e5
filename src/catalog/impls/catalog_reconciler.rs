use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use crate::common::common::flag_raised;
use crate::catalog::enums::catalog_update::CatalogUpdate;
use crate::catalog::enums::pending_write::PendingWrite;
use crate::catalog::errors::CatalogError;
use crate::catalog::structs::catalog_reconciler::CatalogReconciler;
use crate::catalog::structs::catalog_record::CatalogRecord;
use crate::catalog::structs::repair_report::RepairReport;
use crate::catalog::traits::catalog_backend::CatalogBackend;
use crate::identity::structs::info_hash::InfoHash;
use crate::session::enums::session_error::SessionError;
use crate::session::enums::session_status::SessionStatus;
use crate::session::structs::ensure_options::EnsureOptions;
use crate::session::structs::session_registry::SessionRegistry;
use crate::session::structs::session_snapshot::SessionSnapshot;

impl CatalogReconciler {
    pub fn new(backend: Arc<dyn CatalogBackend>, registry: Arc<SessionRegistry>) -> CatalogReconciler {
        CatalogReconciler {
            backend,
            registry,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Writes the full record for a session. A failure is queued for retry, replacing
    /// any older pending write for the same hash.
    pub async fn on_session_changed(&self, snapshot: &SessionSnapshot) -> bool {
        let record = CatalogRecord::from_snapshot(snapshot);
        match self.backend.upsert(&record).await {
            Ok(()) => {
                self.pending.lock().remove(&record.content_hash);
                true
            }
            Err(e) => {
                warn!("[CATALOG] upsert of {} failed, will retry: {}", record.content_hash.short(), e);
                self.pending.lock().insert(record.content_hash, PendingWrite::Upsert(Box::new(record)));
                false
            }
        }
    }

    pub async fn on_session_removed(&self, content_hash: &InfoHash) -> bool {
        match self.backend.remove(content_hash).await {
            Ok(_) => {
                self.pending.lock().remove(content_hash);
                true
            }
            Err(e) => {
                warn!("[CATALOG] removal of {} failed, will retry: {}", content_hash.short(), e);
                self.pending.lock().insert(*content_hash, PendingWrite::Remove);
                false
            }
        }
    }

    pub async fn apply(&self, update: CatalogUpdate) -> bool {
        match update {
            CatalogUpdate::Upsert(snapshot) => self.on_session_changed(&snapshot).await,
            CatalogUpdate::Remove(content_hash) => self.on_session_removed(&content_hash).await,
        }
    }

    /// Retries every pending write once. Returns how many succeeded.
    pub async fn flush_pending(&self) -> usize {
        let pending: Vec<(InfoHash, PendingWrite)> = std::mem::take(&mut *self.pending.lock()).into_iter().collect();
        if pending.is_empty() {
            return 0;
        }
        debug!("[CATALOG] retrying {} pending writes", pending.len());
        let mut flushed = 0;
        for (content_hash, write) in pending {
            let result = match &write {
                PendingWrite::Upsert(record) => self.backend.upsert(record).await,
                PendingWrite::Remove => self.backend.remove(&content_hash).await.map(|_| ()),
            };
            match result {
                Ok(()) => flushed += 1,
                Err(e) => {
                    debug!("[CATALOG] retry of {} failed: {}", content_hash.short(), e);
                    self.pending.lock().entry(content_hash).or_insert(write);
                }
            }
        }
        if flushed > 0 {
            info!("[CATALOG] flushed {} pending writes", flushed);
        }
        flushed
    }

    /// Recreates a session for every stored record, handing back persisted metadata
    /// when there is any. Returns the number of sessions ensured.
    pub async fn reload_from_catalog(&self) -> Result<usize, CatalogError> {
        let records = self.backend.load_records().await?;
        info!("[CATALOG] reloading {} records", records.len());
        let mut ensured = 0;
        for record in records {
            if record.source_uri.trim().is_empty() {
                warn!("[CATALOG] record {} has no source uri, skipping", record.content_hash.short());
                continue;
            }
            let metadata = record.decode_metadata();
            if record.metadata.is_some() && metadata.is_none() {
                warn!("[CATALOG] record {} carries undecodable metadata, ignoring it", record.content_hash.short());
            }
            let options = EnsureOptions { role: record.role, metadata };
            let result = match self.registry.ensure_session(&record.source_uri, options).await {
                Err(SessionError::MetadataMismatch) => {
                    warn!("[CATALOG] record {} metadata no longer matches its hash, fetching again", record.content_hash.short());
                    self.registry.ensure_session(&record.source_uri, EnsureOptions { role: record.role, metadata: None }).await
                }
                other => other,
            };
            match result {
                Ok(handle) => {
                    if record.status.progress > 0.0 && handle.snapshot().has_metadata() {
                        let _ = handle.report_progress(record.status.progress).await;
                    }
                    if record.status.state == SessionStatus::Paused {
                        let _ = handle.pause().await;
                    }
                    ensured += 1;
                }
                Err(e) => error!("[CATALOG] could not restore {}: {}", record.content_hash.short(), e),
            }
        }
        Ok(ensured)
    }

    /// Upserts live sessions missing from the catalog and deletes records whose session
    /// no longer exists.
    pub async fn repair(&self) -> Result<RepairReport, CatalogError> {
        self.flush_pending().await;
        let records = self.backend.load_records().await?;
        let stored: BTreeSet<InfoHash> = records.iter().map(|record| record.content_hash).collect();
        let live: Vec<SessionSnapshot> = self.registry.list().iter().map(|handle| handle.snapshot()).collect();
        let live_hashes: BTreeSet<InfoHash> = live.iter().map(|snapshot| snapshot.content_hash).collect();

        let mut report = RepairReport::default();
        for snapshot in live.iter().filter(|snapshot| !stored.contains(&snapshot.content_hash)) {
            if self.on_session_changed(snapshot).await {
                report.upserted += 1;
            }
        }
        for content_hash in stored.difference(&live_hashes) {
            if self.on_session_removed(content_hash).await {
                report.removed += 1;
            }
        }
        if report != RepairReport::default() {
            info!("[CATALOG] repair upserted {} and removed {} records", report.upserted, report.removed);
        }
        Ok(report)
    }

    /// Applies updates until shutdown, retrying failed writes and running the repair
    /// sweep on their intervals. Updates already queued at shutdown are still applied.
    pub async fn run(self: Arc<Self>, mut updates_rx: mpsc::UnboundedReceiver<CatalogUpdate>, mut shutdown_rx: watch::Receiver<bool>, retry_interval: Duration, repair_interval: Duration) {
        let mut retry = tokio::time::interval_at(tokio::time::Instant::now() + retry_interval, retry_interval);
        retry.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut repair = tokio::time::interval_at(tokio::time::Instant::now() + repair_interval, repair_interval);
        repair.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = flag_raised(&mut shutdown_rx) => break,
                update = updates_rx.recv() => match update {
                    Some(update) => { self.apply(update).await; }
                    None => break,
                },
                _ = retry.tick() => { self.flush_pending().await; }
                _ = repair.tick() => {
                    if let Err(e) = self.repair().await {
                        warn!("[CATALOG] repair sweep failed: {}", e);
                    }
                }
            }
        }

        while let Ok(update) = updates_rx.try_recv() {
            self.apply(update).await;
        }
        self.flush_pending().await;
        let left = self.pending_count();
        if left > 0 {
            warn!("[CATALOG] {} writes still pending at shutdown", left);
        }
        info!("[CATALOG] reconciler stopped");
    }
}
