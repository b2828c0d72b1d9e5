use std::net::SocketAddr;
use chrono::Utc;
use crate::peer::enums::close_reason::CloseReason;
use crate::peer::enums::connection_direction::ConnectionDirection;
use crate::peer::enums::fsm_error::FsmError;
use crate::peer::enums::handshake_state::HandshakeState;
use crate::peer::structs::peer_connection::PeerConnection;

impl PeerConnection {
    pub fn new(conn_id: u64, remote: SocketAddr, direction: ConnectionDirection) -> PeerConnection {
        PeerConnection {
            conn_id,
            peer_id: None,
            remote,
            direction,
            handshake_state: HandshakeState::Connecting,
            supports_metadata_ext: false,
            metadata_ext_id: None,
            declared_metadata_size: None,
            interested: false,
            choking: true,
            connected_at: Utc::now(),
            handshake_sent_at: None,
            handshake_completed_at: None,
            extension_negotiated_at: None,
            closed_at: None,
            close_reason: None,
        }
    }

    /// Moves to `next` if it is the direct successor of the current state (or `Closed`).
    pub fn transition(&mut self, next: HandshakeState) -> Result<(), FsmError> {
        if !self.handshake_state.can_transition_to(next) {
            return Err(FsmError::InvalidTransition { from: self.handshake_state, to: next });
        }
        let now = Some(Utc::now());
        match next {
            HandshakeState::Connecting => {}
            HandshakeState::HandshakeSent => self.handshake_sent_at = now,
            HandshakeState::HandshakeComplete => self.handshake_completed_at = now,
            HandshakeState::ExtensionNegotiated => self.extension_negotiated_at = now,
            HandshakeState::Closed => self.closed_at = now,
        }
        self.handshake_state = next;
        Ok(())
    }

    /// Applies a received extension handshake. Only valid once the base handshake is done.
    pub fn negotiate_extensions(&mut self, metadata_ext_id: Option<u8>, metadata_size: Option<u32>) -> Result<(), FsmError> {
        self.authorize_extension_message()?;
        if self.handshake_state == HandshakeState::HandshakeComplete {
            self.transition(HandshakeState::ExtensionNegotiated)?;
        }
        self.metadata_ext_id = metadata_ext_id;
        self.supports_metadata_ext = metadata_ext_id.is_some();
        if metadata_size.is_some() {
            self.declared_metadata_size = metadata_size;
        }
        Ok(())
    }

    /// Returns true only for the call that actually closed the connection; the first reason sticks.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if self.is_closed() {
            return false;
        }
        self.close_reason = Some(reason);
        self.transition(HandshakeState::Closed).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.handshake_state == HandshakeState::Closed
    }

    pub fn is_negotiated(&self) -> bool {
        self.handshake_state == HandshakeState::ExtensionNegotiated
    }

    /// Extension handshakes may only flow once the base handshake completed.
    pub fn authorize_extension_message(&self) -> Result<(), FsmError> {
        match self.handshake_state {
            HandshakeState::HandshakeComplete | HandshakeState::ExtensionNegotiated => Ok(()),
            state => Err(FsmError::ExtensionBeforeHandshake(state)),
        }
    }

    /// `ut_metadata` messages need a negotiated extension; returns the remote's message id.
    pub fn authorize_metadata_message(&self) -> Result<u8, FsmError> {
        if self.handshake_state != HandshakeState::ExtensionNegotiated {
            return Err(FsmError::MetadataBeforeNegotiation(self.handshake_state));
        }
        self.metadata_ext_id.ok_or(FsmError::MetadataUnsupported)
    }
}
