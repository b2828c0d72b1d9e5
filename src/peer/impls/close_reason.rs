use std::fmt;
use std::fmt::Formatter;
use crate::peer::enums::close_reason::CloseReason;
use crate::peer::enums::timeout_stage::TimeoutStage;

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CloseReason::HashMismatch => write!(f, "content hash mismatch"),
            CloseReason::Timeout(TimeoutStage::Connect) => write!(f, "connect timeout"),
            CloseReason::Timeout(TimeoutStage::Handshake) => write!(f, "handshake timeout"),
            CloseReason::Timeout(TimeoutStage::Extension) => write!(f, "extension handshake timeout"),
            CloseReason::ProtocolViolation(detail) => write!(f, "protocol violation: {detail}"),
            CloseReason::Io(detail) => write!(f, "I/O error: {detail}"),
            CloseReason::RemoteClosed => write!(f, "closed by remote"),
            CloseReason::Cancelled => write!(f, "cancelled"),
            CloseReason::Paused => write!(f, "session paused"),
        }
    }
}
