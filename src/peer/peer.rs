use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use log::{debug, error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use crate::common::common::flag_raised;
use crate::peer::enums::peer_transport::PeerTransport;
use crate::session::structs::session_registry::SessionRegistry;
use crate::wire::wire::read_handshake_timeout;

/// Accepts inbound wires and routes them to the session owning their content hash.
pub async fn peer_listener(listener: TcpListener, registry: Arc<SessionRegistry>, mut shutdown_rx: watch::Receiver<bool>) {
    match listener.local_addr() {
        Ok(address) => info!("[LISTENER] accepting peers on {address}"),
        Err(_) => info!("[LISTENER] accepting peers"),
    }
    let handshake_timeout = Duration::from_secs(registry.config.swarm.handshake_timeout);

    loop {
        tokio::select! {
            _ = flag_raised(&mut shutdown_rx) => {
                info!("[LISTENER] shutting down");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, remote)) => {
                    let registry = registry.clone();
                    tokio::spawn(async move {
                        route_inbound(stream, remote, registry, handshake_timeout).await;
                    });
                }
                Err(e) => {
                    error!("[LISTENER] accept failed: {e}");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            },
        }
    }
}

#[tracing::instrument(level = "debug", skip(stream, registry))]
async fn route_inbound(mut stream: TcpStream, remote: SocketAddr, registry: Arc<SessionRegistry>, handshake_timeout: Duration) {
    let handshake = match read_handshake_timeout(&mut stream, handshake_timeout).await {
        Ok(handshake) => handshake,
        Err(e) => {
            debug!("[LISTENER] dropping {remote}: {e}");
            return;
        }
    };

    let Some(session) = registry.get(&handshake.info_hash) else {
        debug!("[LISTENER] dropping {remote}: no session for {}", handshake.info_hash);
        return;
    };

    let _ = stream.set_nodelay(true);
    let transport = PeerTransport::Stream {
        stream: Box::new(stream),
        inbound_handshake: Some(handshake),
    };
    if let Err(e) = session.attach_peer(transport, remote).await {
        warn!("[LISTENER] session {} refused {remote}: {e}", handshake.info_hash.short());
    }
}
