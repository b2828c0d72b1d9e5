use crate::peer::enums::handshake_state::HandshakeState;
use crate::session::structs::session_snapshot::SessionSnapshot;

impl SessionSnapshot {
    /// Peers that are not closed.
    pub fn live_peers(&self) -> usize {
        self.peers.values().filter(|peer| !peer.is_closed()).count()
    }

    pub fn peers_in(&self, state: HandshakeState) -> usize {
        self.peers.values().filter(|peer| peer.handshake_state == state).count()
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }
}
