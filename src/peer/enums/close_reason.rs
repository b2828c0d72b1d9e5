use serde::{Deserialize, Serialize};
use crate::peer::enums::timeout_stage::TimeoutStage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    HashMismatch,
    Timeout(TimeoutStage),
    ProtocolViolation(String),
    Io(String),
    RemoteClosed,
    Cancelled,
    Paused,
}
