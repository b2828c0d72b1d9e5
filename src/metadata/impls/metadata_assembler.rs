use std::collections::BTreeMap;
use log::{debug, info, warn};
use tokio::time::Instant;
use crate::identity::structs::info_hash::InfoHash;
use crate::metadata::enums::assembly_outcome::AssemblyOutcome;
use crate::metadata::enums::metadata_error::MetadataError;
use crate::metadata::metadata::{piece_length, verify_metadata};
use crate::metadata::structs::assembler_peer::AssemblerPeer;
use crate::metadata::structs::metadata_assembler::MetadataAssembler;
use crate::metadata::structs::metadata_assembler_config::MetadataAssemblerConfig;
use crate::metadata::structs::metadata_assembly::MetadataAssembly;

impl MetadataAssembler {
    pub fn new(info_hash: InfoHash, config: MetadataAssemblerConfig) -> MetadataAssembler {
        MetadataAssembler {
            info_hash,
            config,
            assembly: MetadataAssembly::default(),
            peers: BTreeMap::new(),
            failed_attempts: 0,
            next_sequence: 0,
            cursor: 0,
        }
    }

    pub fn declared_total_size(&self) -> Option<u32> {
        self.assembly.declared_total_size
    }

    /// Registers a negotiated, metadata capable peer. The first acceptable declared size
    /// initializes the assembly; later peers that disagree are flagged and, unless the
    /// validation level is lenient, never asked for pieces.
    pub fn add_peer(&mut self, conn_id: u64, declared_size: Option<u32>) -> Result<(), MetadataError> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let mut peer = AssemblerPeer {
            conn_id,
            sequence,
            declared_size,
            size_mismatch: false,
            strikes: 0,
            rejected_at: None,
        };
        let mut result = Ok(());
        if let Some(size) = declared_size {
            match self.assembly.declared_total_size {
                None if size > self.config.max_metadata_size => {
                    peer.size_mismatch = true;
                    result = Err(MetadataError::TooLarge { size, limit: self.config.max_metadata_size });
                }
                None => {
                    self.assembly.initialize(size);
                    info!("[METADATA] {} assembling {} bytes in {} pieces", self.info_hash.short(), size, self.assembly.piece_count);
                }
                Some(declared) if declared != size => {
                    peer.size_mismatch = true;
                    warn!("[METADATA] {} peer #{} declared {} bytes, assembly uses {}", self.info_hash.short(), conn_id, size, declared);
                    result = Err(MetadataError::SizeMismatch { declared, reported: size });
                }
                Some(_) => {}
            }
        }
        if let Some(existing) = self.peers.get(&conn_id) {
            peer.strikes = existing.strikes;
            peer.sequence = existing.sequence;
        }
        self.peers.insert(conn_id, peer);
        result
    }

    pub fn remove_peer(&mut self, conn_id: u64) {
        self.peers.remove(&conn_id);
        let released = self.assembly.release_peer(conn_id);
        if released > 0 {
            debug!("[METADATA] {} released {} requests of peer #{}", self.info_hash.short(), released, conn_id);
        }
    }

    pub fn is_eligible(&self, conn_id: u64) -> bool {
        self.peers.get(&conn_id).is_some_and(|peer| self.peer_eligible(peer))
    }

    fn peer_eligible(&self, peer: &AssemblerPeer) -> bool {
        if peer.rejected_at.is_some() || peer.strikes >= self.config.max_bad_contributions {
            return false;
        }
        !peer.size_mismatch || (self.config.validation.tolerates_size_mismatch() && peer.declared_size.is_some_and(|size| size <= self.config.max_metadata_size))
    }

    /// Peers that may be asked this round. After a failed checksum only the eligible
    /// peer with the fewest strikes (earliest negotiated on ties) is used.
    fn eligible_peers(&self) -> Vec<u64> {
        let mut eligible: Vec<&AssemblerPeer> = self.peers.values().filter(|peer| self.peer_eligible(peer)).collect();
        eligible.sort_by_key(|peer| (peer.strikes, peer.sequence));
        if self.failed_attempts > 0 {
            eligible.truncate(1);
        } else {
            eligible.sort_by_key(|peer| peer.sequence);
        }
        eligible.into_iter().map(|peer| peer.conn_id).collect()
    }

    /// Assigns missing pieces round-robin over eligible peers, never exceeding
    /// `max_requests_per_peer` outstanding requests per peer.
    #[tracing::instrument(level = "debug", skip(self), fields(info_hash = %self.info_hash.short()))]
    pub fn schedule(&mut self, now: Instant) -> Vec<(u64, u32)> {
        let mut assignments = Vec::new();
        if self.assembly.declared_total_size.is_none() {
            return assignments;
        }
        let peers = self.eligible_peers();
        if peers.is_empty() {
            return assignments;
        }
        let mut load: BTreeMap<u64, usize> = peers.iter().map(|conn_id| (*conn_id, self.assembly.outstanding_for(*conn_id))).collect();

        for piece in self.assembly.missing_pieces() {
            let mut assigned = None;
            for offset in 0..peers.len() {
                let conn_id = peers[(self.cursor + offset) % peers.len()];
                let outstanding = load.entry(conn_id).or_default();
                if *outstanding < self.config.max_requests_per_peer {
                    *outstanding += 1;
                    self.cursor = (self.cursor + offset + 1) % peers.len();
                    assigned = Some(conn_id);
                    break;
                }
            }
            let Some(conn_id) = assigned else {
                break;
            };
            self.assembly.requested.insert(piece, (conn_id, now));
            assignments.push((conn_id, piece));
        }
        assignments
    }

    /// Feeds a received piece. Only pieces requested from `conn_id` are accepted.
    #[tracing::instrument(level = "debug", skip(self, data), fields(info_hash = %self.info_hash.short(), len = data.len()))]
    pub fn receive_piece(&mut self, conn_id: u64, piece: u32, total_size: Option<u32>, data: Vec<u8>) -> AssemblyOutcome {
        let Some(declared) = self.assembly.declared_total_size else {
            return AssemblyOutcome::Ignored(MetadataError::SizeUnknown);
        };
        match self.assembly.requested.get(&piece) {
            Some((owner, _)) if *owner == conn_id => {}
            _ => return AssemblyOutcome::Ignored(MetadataError::UnexpectedPiece(piece)),
        }
        self.assembly.requested.remove(&piece);

        if let Some(reported) = total_size.filter(|reported| *reported != declared) {
            self.flag_size_mismatch(conn_id);
            return AssemblyOutcome::Ignored(MetadataError::SizeMismatch { declared, reported });
        }
        let expected = piece_length(declared, piece).unwrap_or_default();
        if data.len() != expected {
            self.strike(conn_id);
            return AssemblyOutcome::Ignored(MetadataError::PieceLength { piece, expected, actual: data.len() });
        }

        self.assembly.pieces.insert(piece, data);
        self.assembly.contributors.insert(piece, conn_id);
        if !self.assembly.is_complete() {
            return AssemblyOutcome::Pending;
        }

        let metadata = self.assembly.concatenate();
        if verify_metadata(&self.info_hash, &metadata) {
            info!("[METADATA] {} verified {} bytes from {} peer(s)", self.info_hash.short(), metadata.len(), self.contributor_ids().len());
            for peer in self.peers.values_mut() {
                peer.strikes = 0;
            }
            self.assembly.reset();
            return AssemblyOutcome::Complete(metadata);
        }

        let offenders = self.contributor_ids();
        self.failed_attempts += 1;
        warn!("[METADATA] {} checksum mismatch (attempt {}), discarding pieces from {:?}", self.info_hash.short(), self.failed_attempts, offenders);
        for conn_id in offenders.iter() {
            self.strike(*conn_id);
        }
        self.assembly.reset();
        for peer in self.peers.values_mut() {
            peer.rejected_at = None;
        }
        self.cursor = 0;
        AssemblyOutcome::Rejected { offenders }
    }

    /// The peer refused a request. It sits out until `request_timeout` has passed,
    /// then `expire_requests` lets it back in.
    pub fn reject_piece(&mut self, conn_id: u64, piece: u32, now: Instant) {
        self.release_request(conn_id, piece);
        if let Some(peer) = self.peers.get_mut(&conn_id) {
            peer.rejected_at = Some(now);
        }
        self.assembly.release_peer(conn_id);
    }

    /// Drops an outstanding request without blaming the peer, e.g. when it could not be sent.
    pub fn release_request(&mut self, conn_id: u64, piece: u32) {
        if self.assembly.requested.get(&piece).is_some_and(|(owner, _)| *owner == conn_id) {
            self.assembly.requested.remove(&piece);
        }
    }

    /// Releases requests older than the configured timeout and readmits peers whose
    /// refusal is at least that old. Returns how many requests expired.
    pub fn expire_requests(&mut self, now: Instant) -> usize {
        let timeout = self.config.request_timeout;
        let before = self.assembly.requested.len();
        self.assembly.requested.retain(|_, (_, sent)| now.saturating_duration_since(*sent) < timeout);
        for peer in self.peers.values_mut() {
            if peer.rejected_at.is_some_and(|at| now.saturating_duration_since(at) >= timeout) {
                debug!("[METADATA] {} peer #{} may be asked again", self.info_hash.short(), peer.conn_id);
                peer.rejected_at = None;
            }
        }
        before - self.assembly.requested.len()
    }

    pub fn strikes(&self, conn_id: u64) -> Option<u32> {
        self.peers.get(&conn_id).map(|peer| peer.strikes)
    }

    pub fn has_eligible_peer(&self) -> bool {
        self.peers.values().any(|peer| self.peer_eligible(peer))
    }

    fn contributor_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.assembly.contributors.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn strike(&mut self, conn_id: u64) {
        if let Some(peer) = self.peers.get_mut(&conn_id) {
            peer.strikes += 1;
            if peer.strikes >= self.config.max_bad_contributions {
                warn!("[METADATA] {} peer #{} excluded after {} bad contributions", self.info_hash.short(), conn_id, peer.strikes);
            }
        }
        self.assembly.release_peer(conn_id);
    }

    fn flag_size_mismatch(&mut self, conn_id: u64) {
        if let Some(peer) = self.peers.get_mut(&conn_id) {
            peer.size_mismatch = true;
        }
        self.assembly.release_peer(conn_id);
    }
}
