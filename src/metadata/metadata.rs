use sha1::{Digest, Sha1};
use crate::identity::structs::info_hash::InfoHash;
use crate::wire::wire::METADATA_PIECE_SIZE;

pub fn piece_count(total_size: u32) -> u32 {
    (total_size as usize).div_ceil(METADATA_PIECE_SIZE) as u32
}

/// Exact length of `piece` in metadata of `total_size` bytes; `None` when out of range.
pub fn piece_length(total_size: u32, piece: u32) -> Option<usize> {
    let count = piece_count(total_size);
    if piece >= count {
        return None;
    }
    if piece + 1 < count {
        return Some(METADATA_PIECE_SIZE);
    }
    Some(total_size as usize - METADATA_PIECE_SIZE * (count as usize - 1))
}

/// Slice of validated metadata served for a `ut_metadata` request.
pub fn metadata_piece(metadata: &[u8], piece: u32) -> Option<&[u8]> {
    let start = (piece as usize).checked_mul(METADATA_PIECE_SIZE)?;
    if start >= metadata.len() {
        return None;
    }
    let end = (start + METADATA_PIECE_SIZE).min(metadata.len());
    metadata.get(start..end)
}

pub fn hash_metadata(metadata: &[u8]) -> InfoHash {
    let digest = Sha1::digest(metadata);
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&digest);
    InfoHash(hash)
}

pub fn verify_metadata(info_hash: &InfoHash, metadata: &[u8]) -> bool {
    hash_metadata(metadata) == *info_hash
}
