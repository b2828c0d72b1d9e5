use std::collections::BTreeMap;
use crate::metadata::metadata::piece_count;
use crate::metadata::structs::metadata_assembly::MetadataAssembly;

impl MetadataAssembly {
    pub fn initialize(&mut self, total_size: u32) {
        self.declared_total_size = Some(total_size);
        self.piece_count = piece_count(total_size);
    }

    pub fn is_complete(&self) -> bool {
        self.piece_count > 0 && self.pieces.len() as u32 == self.piece_count
    }

    pub fn missing_pieces(&self) -> Vec<u32> {
        (0..self.piece_count)
            .filter(|piece| !self.pieces.contains_key(piece) && !self.requested.contains_key(piece))
            .collect()
    }

    pub fn outstanding_for(&self, conn_id: u64) -> usize {
        self.requested.values().filter(|(owner, _)| *owner == conn_id).count()
    }

    pub fn release_peer(&mut self, conn_id: u64) -> usize {
        let before = self.requested.len();
        self.requested.retain(|_, (owner, _)| *owner != conn_id);
        before - self.requested.len()
    }

    pub fn concatenate(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.declared_total_size.unwrap_or_default() as usize);
        for piece in self.pieces.values() {
            out.extend_from_slice(piece);
        }
        out
    }

    /// Drops all pieces and outstanding requests, keeping the declared size.
    pub fn reset(&mut self) {
        self.pieces = BTreeMap::new();
        self.contributors = BTreeMap::new();
        self.requested = BTreeMap::new();
    }
}
