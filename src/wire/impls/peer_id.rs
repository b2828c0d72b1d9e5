use std::fmt;
use std::fmt::Formatter;
use crate::wire::structs::peer_id::PeerId;

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl PeerId {
    /// Azureus-style client detection from the `-XX0000-` prefix.
    pub fn get_client_name(&self) -> Option<&'static str> {
        if self.0[0] != b'-' || self.0[7] != b'-' {
            return None;
        }
        let name = match &self.0[1..3] {
            b"AZ" => "Azureus",
            b"BC" => "BitComet",
            b"DE" => "DelugeTorrent",
            b"KT" => "KTorrent",
            b"LT" => "libtorrent",
            b"lt" => "libTorrent",
            b"MS" => "magnet-swarm",
            b"qB" => "qBittorrent",
            b"TR" => "Transmission",
            b"UT" => "µTorrent",
            b"WW" => "WebTorrent",
            _ => return None,
        };
        Some(name)
    }

    /// Peer id rendered for logs: printable ASCII kept, everything else escaped.
    pub fn to_printable(&self) -> String {
        self.0.iter()
            .map(|byte| match byte {
                0x20..=0x7e => (*byte as char).to_string(),
                _ => format!("\\x{byte:02x}"),
            })
            .collect()
    }
}
