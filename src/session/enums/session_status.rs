use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    AwaitingMetadata,
    Ready,
    Downloading,
    Seeding,
    Paused,
    Errored,
}
