use tokio::io::{AsyncRead, AsyncWrite};

/// Anything a peer connection can run over: TCP sockets in production,
/// in-memory duplex pipes in tests.
pub trait PeerStream: AsyncRead + AsyncWrite + Unpin + Send + 'static {}

impl<T> PeerStream for T where T: AsyncRead + AsyncWrite + Unpin + Send + 'static {}
