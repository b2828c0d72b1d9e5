use crate::peer::traits::peer_stream::PeerStream;
use crate::wire::structs::handshake::Handshake;

pub enum PeerTransport {
    /// Dial the connection's remote address.
    Dial,
    /// An established stream, with the remote handshake if it was already read.
    Stream {
        stream: Box<dyn PeerStream>,
        inbound_handshake: Option<Handshake>,
    },
}
