use bip_bencode::{BDecodeOpt, BRefAccess, BencodeRef};
use crate::metadata::enums::metadata_error::MetadataError;
use crate::metadata::structs::torrent_file_entry::TorrentFileEntry;
use crate::metadata::structs::torrent_info::TorrentInfo;

impl TorrentInfo {
    /// Parses a validated info dictionary (single or multi file layout).
    pub fn parse(metadata: &[u8]) -> Result<TorrentInfo, MetadataError> {
        let bencode = BencodeRef::decode(metadata, BDecodeOpt::new(32, false, true))
            .map_err(|e| MetadataError::InvalidInfo(format!("{e:?}")))?;
        let info = bencode.dict()
            .ok_or_else(|| MetadataError::InvalidInfo("info is not a dictionary".to_string()))?;

        let name_bytes = info.lookup(b"name.utf-8")
            .or_else(|| info.lookup(b"name"))
            .and_then(|value| value.bytes())
            .ok_or_else(|| MetadataError::InvalidInfo("missing name".to_string()))?;
        let name = String::from_utf8_lossy(name_bytes).into_owned();
        check_component(&name)?;

        let piece_length = info.lookup(b"piece length")
            .and_then(|value| value.int())
            .filter(|length| *length > 0)
            .ok_or_else(|| MetadataError::InvalidInfo("missing piece length".to_string()))? as u64;

        let mut files = Vec::new();
        if let Some(length) = info.lookup(b"length").and_then(|value| value.int()) {
            files.push(TorrentFileEntry {
                name: name.clone(),
                path: name.clone(),
                size: non_negative(length)?,
            });
        } else {
            let list = info.lookup(b"files")
                .and_then(|value| value.list())
                .ok_or_else(|| MetadataError::InvalidInfo("neither length nor files present".to_string()))?;
            for index in 0..list.len() {
                let entry = list.get(index)
                    .and_then(|value| value.dict())
                    .ok_or_else(|| MetadataError::InvalidInfo(format!("file {index} is not a dictionary")))?;
                let size = entry.lookup(b"length")
                    .and_then(|value| value.int())
                    .ok_or_else(|| MetadataError::InvalidInfo(format!("file {index} has no length")))?;
                let components = entry.lookup(b"path.utf-8")
                    .or_else(|| entry.lookup(b"path"))
                    .and_then(|value| value.list())
                    .ok_or_else(|| MetadataError::InvalidInfo(format!("file {index} has no path")))?;
                let mut path = vec![name.clone()];
                for component in 0..components.len() {
                    let part = components.get(component)
                        .and_then(|value| value.bytes())
                        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                        .ok_or_else(|| MetadataError::InvalidInfo(format!("file {index} has a malformed path")))?;
                    check_component(&part)?;
                    path.push(part);
                }
                if path.len() < 2 {
                    return Err(MetadataError::InvalidInfo(format!("file {index} has an empty path")));
                }
                files.push(TorrentFileEntry {
                    name: path.last().cloned().unwrap_or_default(),
                    path: path.join("/"),
                    size: non_negative(size)?,
                });
            }
        }

        let total_size = files.iter()
            .try_fold(0u64, |total, file| total.checked_add(file.size))
            .ok_or_else(|| MetadataError::InvalidInfo("total length overflows".to_string()))?;
        Ok(TorrentInfo {
            total_size,
            name,
            piece_length,
            files,
        })
    }

    /// Looks a file up by its name or its relative path.
    pub fn find_file(&self, filename: &str) -> Option<&TorrentFileEntry> {
        self.files.iter()
            .find(|file| file.path == filename)
            .or_else(|| self.files.iter().find(|file| file.name == filename))
    }
}

fn check_component(component: &str) -> Result<(), MetadataError> {
    if component.is_empty() || component == "." || component == ".." || component.contains(['/', '\\', '\0']) {
        return Err(MetadataError::InvalidInfo(format!("unsafe path component '{component}'")));
    }
    Ok(())
}

fn non_negative(value: i64) -> Result<u64, MetadataError> {
    u64::try_from(value).map_err(|_| MetadataError::InvalidInfo(format!("negative length {value}")))
}
