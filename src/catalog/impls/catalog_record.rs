use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crate::catalog::structs::catalog_file::CatalogFile;
use crate::catalog::structs::catalog_record::CatalogRecord;
use crate::catalog::structs::catalog_status::CatalogStatus;
use crate::session::structs::session_snapshot::SessionSnapshot;

impl CatalogRecord {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> CatalogRecord {
        let (size, files) = match snapshot.info.as_ref() {
            Some(info) => (
                info.total_size,
                info.files.iter().map(|file| CatalogFile {
                    name: file.name.clone(),
                    path: file.path.clone(),
                    size: file.size,
                }).collect(),
            ),
            None => (0, Vec::new()),
        };
        CatalogRecord {
            content_hash: snapshot.content_hash,
            display_name: snapshot.display_name.clone(),
            source_uri: snapshot.source_uri.clone(),
            size,
            files,
            status: CatalogStatus {
                progress: snapshot.progress,
                peers: snapshot.live_peers(),
                state: snapshot.status,
            },
            created: snapshot.created,
            role: snapshot.role,
            metadata: snapshot.metadata.as_ref().map(|metadata| STANDARD.encode(metadata.as_slice())),
        }
    }

    /// Decodes the persisted info dictionary, if any. Undecodable data is treated as absent.
    pub fn decode_metadata(&self) -> Option<Vec<u8>> {
        self.metadata.as_ref().and_then(|encoded| STANDARD.decode(encoded).ok())
    }
}
