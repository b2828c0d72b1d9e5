use std::fmt;
use std::fmt::Formatter;
use crate::session::enums::session_role::SessionRole;
use crate::session::enums::session_status::SessionStatus;

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            SessionStatus::AwaitingMetadata => "awaiting_metadata",
            SessionStatus::Ready => "ready",
            SessionStatus::Downloading => "downloading",
            SessionStatus::Seeding => "seeding",
            SessionStatus::Paused => "paused",
            SessionStatus::Errored => "errored",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SessionRole::Seeding => write!(f, "seeding"),
            SessionRole::Leeching => write!(f, "leeching"),
        }
    }
}
