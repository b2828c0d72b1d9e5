use std::fmt;
use std::fmt::Formatter;
use crate::announce::enums::announce_event::AnnounceEvent;

impl fmt::Display for AnnounceEvent {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AnnounceEvent::None => write!(f, "none"),
            AnnounceEvent::Started => write!(f, "started"),
            AnnounceEvent::Stopped => write!(f, "stopped"),
        }
    }
}
