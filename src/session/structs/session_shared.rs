use std::sync::Arc;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use crate::identity::structs::info_hash::InfoHash;
use crate::session::enums::session_command::SessionCommand;
use crate::session::structs::session_snapshot::SessionSnapshot;

pub struct SessionShared {
    pub content_hash: InfoHash,
    pub source_uri: String,
    pub created: DateTime<Utc>,
    pub(crate) command_tx: mpsc::Sender<SessionCommand>,
    pub(crate) snapshot_rx: watch::Receiver<SessionSnapshot>,
    pub(crate) cancel_tx: watch::Sender<bool>,
    pub(crate) find_more: Arc<Notify>,
    /// Actor and announce schedule tasks, awaited on removal.
    pub(crate) tasks: Mutex<Vec<JoinHandle<()>>>,
}
