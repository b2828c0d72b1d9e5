#![allow(dead_code)]
use bip_bencode::{ben_bytes, ben_int, ben_map};
use rand::RngExt;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use magnet_swarm::announce::structs::announce_coordinator::AnnounceCoordinator;
use magnet_swarm::catalog::enums::catalog_update::CatalogUpdate;
use magnet_swarm::config::enums::catalog_engine::CatalogEngine;
use magnet_swarm::config::structs::configuration::Configuration;
use magnet_swarm::identity::structs::info_hash::InfoHash;
use magnet_swarm::metadata::metadata::metadata_piece;
use magnet_swarm::session::structs::session_registry::SessionRegistry;
use magnet_swarm::wire::enums::message::Message;
use magnet_swarm::wire::structs::extension_handshake::ExtensionHandshake;
use magnet_swarm::wire::structs::handshake::Handshake;
use magnet_swarm::wire::structs::metadata_message::MetadataMessage;
use magnet_swarm::wire::structs::peer_id::PeerId;
use magnet_swarm::wire::wire::{read_handshake, read_message, write_handshake, write_message, EXTENDED_HANDSHAKE_ID, MAX_FRAME_LEN, METADATA_EXTENSION_NAME};

pub type TestRegistry = Arc<SessionRegistry>;

const FAKE_METADATA_ID: u8 = 3;

/// How a fake peer behaves on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakePeerMode {
    /// Answers every metadata request with the correct piece.
    Honest,
    /// Flips the first byte of every piece it serves.
    Corrupt,
}

pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn create_test_config(dir: &TempDir) -> Configuration {
    let mut config = Configuration::init();
    config.swarm.listen_address = "127.0.0.1:0".to_string();
    config.swarm.handshake_timeout = 2;
    config.swarm.extension_timeout = 2;
    config.swarm.metadata_request_timeout = 2;
    config.announce.trackers = vec![];
    config.announce.discovery_enabled = false;
    config.storage.root = dir.path().join("storage").to_string_lossy().into_owned();
    config.catalog.engine = CatalogEngine::json;
    config.catalog.path = dir.path().join("catalog.json").to_string_lossy().into_owned();
    config
}

pub fn create_test_registry(config: Configuration, catalog_tx: Option<mpsc::UnboundedSender<CatalogUpdate>>) -> TestRegistry {
    let coordinator = Arc::new(AnnounceCoordinator::new(&config.announce));
    Arc::new(SessionRegistry::new(Arc::new(config), coordinator, catalog_tx))
}

pub fn random_info_hash() -> InfoHash {
    let mut rng = rand::rng();
    let bytes: [u8; 20] = rng.random();
    InfoHash(bytes)
}

pub fn random_peer_id() -> PeerId {
    let mut rng = rand::rng();
    let bytes: [u8; 20] = rng.random();
    PeerId(bytes)
}

/// Single-file info dictionary of roughly `20 * pieces` bytes.
pub fn create_info_dict(name: &str, pieces: usize) -> Vec<u8> {
    ben_map! {
        "length" => ben_int!(1 << 20),
        "name" => ben_bytes!(name),
        "piece length" => ben_int!(262144),
        "pieces" => ben_bytes!(vec![0x5c; 20 * pieces])
    }.encode()
}

/// Speaks the remote side of a wire: base handshake, extension handshake with
/// `ut_metadata`, then serves metadata requests from `metadata` until the stream ends.
/// With `initiate` set the fake peer sends its handshake first, as an inbound peer does.
pub async fn run_fake_peer<S>(mut stream: S, info_hash: InfoHash, metadata: Vec<u8>, mode: FakePeerMode, initiate: bool)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let ours = Handshake::new(info_hash, random_peer_id());
    if initiate {
        if write_handshake(&mut stream, &ours).await.is_err() || read_handshake(&mut stream).await.is_err() {
            return;
        }
    } else if read_handshake(&mut stream).await.is_err() || write_handshake(&mut stream, &ours).await.is_err() {
        return;
    }

    let mut extension = ExtensionHandshake::local(Some(metadata.len() as u32));
    extension.extensions.insert(METADATA_EXTENSION_NAME.to_string(), FAKE_METADATA_ID);
    if write_message(&mut stream, &Message::Extended { id: EXTENDED_HANDSHAKE_ID, payload: extension.encode() }).await.is_err() {
        return;
    }

    let mut reply_id = None;
    loop {
        let Ok(message) = read_message(&mut stream, MAX_FRAME_LEN).await else {
            return;
        };
        match message {
            Message::Extended { id: EXTENDED_HANDSHAKE_ID, payload } => {
                reply_id = ExtensionHandshake::decode(&payload).ok().and_then(|handshake| handshake.metadata_extension_id());
            }
            Message::Extended { id: FAKE_METADATA_ID, payload } => {
                let (Ok(request), Some(reply_id)) = (MetadataMessage::decode(&payload), reply_id) else {
                    return;
                };
                let mut data = metadata_piece(&metadata, request.piece).map(|piece| piece.to_vec()).unwrap_or_default();
                if mode == FakePeerMode::Corrupt {
                    if let Some(byte) = data.first_mut() {
                        *byte ^= 0xff;
                    }
                }
                let reply = MetadataMessage::data(request.piece, metadata.len() as u32, data);
                if write_message(&mut stream, &Message::Extended { id: reply_id, payload: reply.encode() }).await.is_err() {
                    return;
                }
            }
            _ => {}
        }
    }
}
