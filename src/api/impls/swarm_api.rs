use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use log::debug;
use crate::announce::structs::tracker_health::TrackerHealth;
use crate::api::enums::api_error::ApiError;
use crate::api::structs::session_info::SessionInfo;
use crate::api::structs::swarm_api::SwarmApi;
use crate::identity::structs::info_hash::InfoHash;
use crate::metadata::structs::torrent_file_entry::TorrentFileEntry;
use crate::metadata::structs::torrent_info::TorrentInfo;
use crate::session::structs::ensure_options::EnsureOptions;
use crate::session::structs::session_handle::SessionHandle;
use crate::session::structs::session_registry::SessionRegistry;

impl SwarmApi {
    pub fn new(registry: Arc<SessionRegistry>) -> SwarmApi {
        SwarmApi { registry }
    }

    pub async fn ensure_session(&self, identifier: &str, options: EnsureOptions) -> Result<SessionInfo, ApiError> {
        let handle = self.registry.ensure_session(identifier, options).await?;
        Ok(Self::info_of(&handle))
    }

    pub async fn remove_session(&self, content_hash: &InfoHash, purge_data: bool) -> bool {
        self.registry.remove(content_hash, purge_data).await
    }

    pub async fn pause(&self, content_hash: &InfoHash) -> Result<(), ApiError> {
        Ok(self.session(content_hash)?.pause().await?)
    }

    pub async fn resume(&self, content_hash: &InfoHash) -> Result<(), ApiError> {
        Ok(self.session(content_hash)?.resume().await?)
    }

    /// Reads one payload file. `filename` is matched against the torrent's file list,
    /// first by relative path and then by bare name; anything else is refused.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_file_contents(&self, content_hash: &InfoHash, filename: &str) -> Result<Vec<u8>, ApiError> {
        let info = self.torrent_info(content_hash)?;
        let file = info.find_file(filename).ok_or_else(|| ApiError::UnknownFile(filename.to_string()))?;
        Ok(tokio::fs::read(self.file_path(content_hash, file)).await?)
    }

    /// Reads every payload file present on disk, keyed by relative path. Files that
    /// have not been written yet are left out.
    pub async fn get_all_file_contents(&self, content_hash: &InfoHash) -> Result<BTreeMap<String, Vec<u8>>, ApiError> {
        let info = self.torrent_info(content_hash)?;
        let mut contents = BTreeMap::new();
        for file in info.files.iter() {
            match tokio::fs::read(self.file_path(content_hash, file)).await {
                Ok(data) => {
                    contents.insert(file.path.clone(), data);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("[SESSION] {} file {} not on disk yet", content_hash.short(), file.path);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(contents)
    }

    pub fn get_tracker_health(&self) -> Vec<TrackerHealth> {
        self.registry.coordinator.get_tracker_health()
    }

    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        self.registry.list().iter().map(Self::info_of).collect()
    }

    fn info_of(handle: &SessionHandle) -> SessionInfo {
        SessionInfo {
            content_hash: handle.content_hash(),
            display_name: handle.display_name(),
            source_uri: handle.source_uri().to_string(),
        }
    }

    fn session(&self, content_hash: &InfoHash) -> Result<SessionHandle, ApiError> {
        self.registry.get(content_hash).ok_or(ApiError::UnknownSession(*content_hash))
    }

    fn torrent_info(&self, content_hash: &InfoHash) -> Result<TorrentInfo, ApiError> {
        self.session(content_hash)?
            .snapshot()
            .info
            .ok_or(ApiError::MetadataUnavailable(*content_hash))
    }

    fn file_path(&self, content_hash: &InfoHash, file: &TorrentFileEntry) -> PathBuf {
        file.path.split('/').fold(self.registry.storage_path(content_hash), |path, component| path.join(component))
    }
}
