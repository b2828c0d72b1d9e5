use thiserror::Error;
use crate::peer::enums::handshake_state::HandshakeState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsmError {
    #[error("illegal transition from {from} to {to}")]
    InvalidTransition { from: HandshakeState, to: HandshakeState },

    #[error("extension message in state {0} before the base handshake completed")]
    ExtensionBeforeHandshake(HandshakeState),

    #[error("metadata message in state {0} before extension negotiation")]
    MetadataBeforeNegotiation(HandshakeState),

    #[error("peer does not support ut_metadata")]
    MetadataUnsupported,
}
