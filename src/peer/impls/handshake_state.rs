use std::fmt;
use std::fmt::Formatter;
use crate::peer::enums::handshake_state::HandshakeState;

impl HandshakeState {
    /// The only state reachable from `self` other than `Closed`.
    pub fn successor(&self) -> Option<HandshakeState> {
        match self {
            HandshakeState::Connecting => Some(HandshakeState::HandshakeSent),
            HandshakeState::HandshakeSent => Some(HandshakeState::HandshakeComplete),
            HandshakeState::HandshakeComplete => Some(HandshakeState::ExtensionNegotiated),
            HandshakeState::ExtensionNegotiated => None,
            HandshakeState::Closed => None,
        }
    }

    pub fn can_transition_to(&self, next: HandshakeState) -> bool {
        match (self, next) {
            (HandshakeState::Closed, _) => false,
            (_, HandshakeState::Closed) => true,
            (current, next) => current.successor() == Some(next),
        }
    }
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            HandshakeState::Connecting => "connecting",
            HandshakeState::HandshakeSent => "handshake_sent",
            HandshakeState::HandshakeComplete => "handshake_complete",
            HandshakeState::ExtensionNegotiated => "extension_negotiated",
            HandshakeState::Closed => "closed",
        };
        write!(f, "{name}")
    }
}
