/// Async byte stream a connection runs over.
pub mod peer_stream;
