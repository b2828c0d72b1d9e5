use log::{debug, info, warn};
use tokio::io::{AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use crate::common::common::flag_raised;
use crate::identity::structs::info_hash::InfoHash;
use crate::peer::enums::close_reason::CloseReason;
use crate::peer::enums::handshake_state::HandshakeState;
use crate::peer::enums::peer_command::PeerCommand;
use crate::peer::enums::peer_event::PeerEvent;
use crate::peer::enums::peer_transport::PeerTransport;
use crate::peer::enums::timeout_stage::TimeoutStage;
use crate::peer::structs::peer_connection::PeerConnection;
use crate::peer::structs::peer_driver::PeerDriver;
use crate::peer::structs::peer_driver_config::PeerDriverConfig;
use crate::peer::traits::peer_stream::PeerStream;
use crate::wire::enums::message::Message;
use crate::wire::enums::metadata_message_type::MetadataMessageType;
use crate::wire::enums::wire_error::WireError;
use crate::wire::structs::extension_handshake::ExtensionHandshake;
use crate::wire::structs::handshake::Handshake;
use crate::wire::structs::metadata_message::MetadataMessage;
use crate::wire::structs::peer_id::PeerId;
use crate::wire::wire::{read_handshake, read_message, write_handshake, write_message, EXTENDED_HANDSHAKE_ID, LOCAL_METADATA_ID};

type PeerReader = ReadHalf<Box<dyn PeerStream>>;
type PeerWriter = WriteHalf<Box<dyn PeerStream>>;

impl PeerDriver {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connection: PeerConnection,
        info_hash: InfoHash,
        local_peer_id: PeerId,
        local_metadata_size: Option<u32>,
        config: PeerDriverConfig,
        cancel_rx: watch::Receiver<bool>,
        command_rx: mpsc::Receiver<PeerCommand>,
        events_tx: mpsc::UnboundedSender<(u64, PeerEvent)>,
    ) -> (PeerDriver, watch::Receiver<PeerConnection>) {
        let (state_tx, state_rx) = watch::channel(connection.clone());
        (PeerDriver {
            connection,
            info_hash,
            local_peer_id,
            local_metadata_size,
            config,
            cancel_rx,
            command_rx,
            events_tx,
            state_tx,
            extension_deadline: None,
        }, state_rx)
    }

    /// Drives the connection until it closes. Always ends in `Closed` and always
    /// reports a final `PeerEvent::Closed` to the session.
    pub async fn run(mut self, transport: PeerTransport) {
        let (stream, inbound_handshake) = match transport {
            PeerTransport::Stream { stream, inbound_handshake } => (stream, inbound_handshake),
            PeerTransport::Dial => match self.dial().await {
                Ok(stream) => (stream, None),
                Err(reason) => {
                    self.finish(reason);
                    return;
                }
            },
        };

        let (mut reader, mut writer) = tokio::io::split(stream);
        let reason = match self.establish(&mut reader, &mut writer, inbound_handshake).await {
            Ok(()) => self.steady_state(reader, &mut writer).await,
            Err(reason) => reason,
        };
        let _ = writer.shutdown().await;
        self.finish(reason);
    }

    async fn dial(&mut self) -> Result<Box<dyn PeerStream>, CloseReason> {
        let remote = self.connection.remote;
        let connect_timeout = self.config.connect_timeout;
        tokio::select! {
            biased;
            _ = flag_raised(&mut self.cancel_rx) => Err(CloseReason::Cancelled),
            result = tokio::time::timeout(connect_timeout, TcpStream::connect(remote)) => match result {
                Ok(Ok(stream)) => {
                    let _ = stream.set_nodelay(true);
                    Ok(Box::new(stream) as Box<dyn PeerStream>)
                }
                Ok(Err(error)) => Err(CloseReason::Io(error.to_string())),
                Err(_) => Err(CloseReason::Timeout(TimeoutStage::Connect)),
            },
        }
    }

    /// Base handshake, in strict order: send ours, receive theirs, verify the hash,
    /// then open extension negotiation if the remote advertises it.
    #[tracing::instrument(level = "debug", skip_all, fields(conn_id = self.connection.conn_id))]
    async fn establish(&mut self, reader: &mut PeerReader, writer: &mut PeerWriter, inbound_handshake: Option<Handshake>) -> Result<(), CloseReason> {
        let local = Handshake::new(self.info_hash, self.local_peer_id);
        let written = tokio::select! {
            biased;
            _ = flag_raised(&mut self.cancel_rx) => return Err(CloseReason::Cancelled),
            result = write_handshake(writer, &local) => result,
        };
        written.map_err(io_reason)?;
        self.advance(HandshakeState::HandshakeSent)?;

        let remote = match inbound_handshake {
            Some(handshake) => handshake,
            None => {
                let handshake_timeout = self.config.handshake_timeout;
                tokio::select! {
                    biased;
                    _ = flag_raised(&mut self.cancel_rx) => return Err(CloseReason::Cancelled),
                    result = tokio::time::timeout(handshake_timeout, read_handshake(reader)) => match result {
                        Ok(Ok(handshake)) => handshake,
                        Ok(Err(error)) => return Err(io_reason(error)),
                        Err(_) => return Err(CloseReason::Timeout(TimeoutStage::Handshake)),
                    },
                }
            }
        };

        if remote.info_hash != self.info_hash {
            warn!("[PEER] {} answered for {} instead of {}", self.connection.remote, remote.info_hash, self.info_hash);
            return Err(CloseReason::HashMismatch);
        }

        self.connection.peer_id = Some(remote.peer_id);
        self.advance(HandshakeState::HandshakeComplete)?;
        debug!("[PEER] {} handshake complete ({})", self.connection.remote, remote.peer_id.get_client_name().unwrap_or("unknown client"));
        self.emit(PeerEvent::HandshakeComplete { peer_id: remote.peer_id });

        if remote.supports_extensions() {
            self.connection.authorize_extension_message()
                .map_err(|e| CloseReason::ProtocolViolation(e.to_string()))?;
            let payload = ExtensionHandshake::local(self.local_metadata_size).encode();
            write_message(writer, &Message::Extended { id: EXTENDED_HANDSHAKE_ID, payload }).await.map_err(io_reason)?;
            self.extension_deadline = Some(Instant::now() + self.config.extension_timeout);
        }
        Ok(())
    }

    async fn steady_state(&mut self, mut reader: PeerReader, writer: &mut PeerWriter) -> CloseReason {
        let (frame_tx, mut frame_rx) = mpsc::channel::<Result<Message, WireError>>(32);
        let max_frame_len = self.config.max_frame_len;
        let reader_task = tokio::spawn(async move {
            loop {
                let result = read_message(&mut reader, max_frame_len).await;
                let failed = result.is_err();
                if frame_tx.send(result).await.is_err() || failed {
                    break;
                }
            }
        });

        let keep_alive_every = self.config.keep_alive_interval;
        let mut keep_alive = tokio::time::interval_at(Instant::now() + keep_alive_every, keep_alive_every);

        let reason = loop {
            let deadline = self.extension_deadline;
            tokio::select! {
                biased;
                _ = flag_raised(&mut self.cancel_rx) => break CloseReason::Cancelled,
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        if let Err(reason) = self.handle_command(command, writer).await {
                            break reason;
                        }
                    }
                    None => break CloseReason::Cancelled,
                },
                frame = frame_rx.recv() => match frame {
                    Some(Ok(message)) => {
                        if let Err(reason) = self.handle_message(message) {
                            break reason;
                        }
                    }
                    Some(Err(error)) => break io_reason(error),
                    None => break CloseReason::RemoteClosed,
                },
                _ = sleep_until_deadline(deadline) => break CloseReason::Timeout(TimeoutStage::Extension),
                _ = keep_alive.tick() => {
                    if let Err(error) = write_message(writer, &Message::KeepAlive).await {
                        break io_reason(error);
                    }
                }
            }
        };

        reader_task.abort();
        reason
    }

    async fn handle_command(&mut self, command: PeerCommand, writer: &mut PeerWriter) -> Result<(), CloseReason> {
        let message = match command {
            PeerCommand::Close(reason) => return Err(reason),
            PeerCommand::RequestMetadata(piece) => {
                match self.connection.authorize_metadata_message() {
                    Ok(id) => Message::Extended { id, payload: MetadataMessage::request(piece).encode() },
                    Err(error) => {
                        debug!("[PEER] {} cannot request piece {}: {}", self.connection.remote, piece, error);
                        self.emit(PeerEvent::MetadataRejected { piece });
                        return Ok(());
                    }
                }
            }
            PeerCommand::SendMetadata { piece, total_size, data } => {
                match self.connection.authorize_metadata_message() {
                    Ok(id) => Message::Extended { id, payload: MetadataMessage::data(piece, total_size, data).encode() },
                    Err(error) => {
                        debug!("[PEER] {} cannot serve piece {}: {}", self.connection.remote, piece, error);
                        return Ok(());
                    }
                }
            }
            PeerCommand::RejectMetadata(piece) => {
                match self.connection.authorize_metadata_message() {
                    Ok(id) => Message::Extended { id, payload: MetadataMessage::reject(piece).encode() },
                    Err(_) => return Ok(()),
                }
            }
        };
        write_message(writer, &message).await.map_err(io_reason)
    }

    fn handle_message(&mut self, message: Message) -> Result<(), CloseReason> {
        match message {
            Message::KeepAlive | Message::Other { .. } => {}
            Message::Choke => self.set_flags(|connection| connection.choking = true),
            Message::Unchoke => self.set_flags(|connection| connection.choking = false),
            Message::Interested => self.set_flags(|connection| connection.interested = true),
            Message::NotInterested => self.set_flags(|connection| connection.interested = false),
            Message::Extended { id: EXTENDED_HANDSHAKE_ID, payload } => {
                let handshake = ExtensionHandshake::decode(&payload)
                    .map_err(|e| CloseReason::ProtocolViolation(format!("bad extension handshake: {e}")))?;
                let first = !self.connection.is_negotiated();
                self.connection
                    .negotiate_extensions(handshake.metadata_extension_id(), handshake.metadata_size)
                    .map_err(|e| CloseReason::ProtocolViolation(e.to_string()))?;
                self.extension_deadline = None;
                self.publish();
                if first {
                    info!("[PEER] {} negotiated extensions (ut_metadata: {}, metadata_size: {:?})",
                        self.connection.remote, self.connection.supports_metadata_ext, handshake.metadata_size);
                }
                self.emit(PeerEvent::ExtensionNegotiated {
                    supports_metadata: self.connection.supports_metadata_ext,
                    metadata_size: handshake.metadata_size,
                });
            }
            Message::Extended { id, payload } => {
                if !self.connection.is_negotiated() {
                    return Err(CloseReason::ProtocolViolation(format!("extension message {id} before extension handshake")));
                }
                if id != LOCAL_METADATA_ID {
                    return Ok(());
                }
                let message = MetadataMessage::decode(&payload)
                    .map_err(|e| CloseReason::ProtocolViolation(format!("bad metadata message: {e}")))?;
                let event = match message.msg_type {
                    MetadataMessageType::Request => PeerEvent::MetadataRequested { piece: message.piece },
                    MetadataMessageType::Data => PeerEvent::MetadataPiece {
                        piece: message.piece,
                        total_size: message.total_size,
                        data: message.data,
                    },
                    MetadataMessageType::Reject => PeerEvent::MetadataRejected { piece: message.piece },
                };
                self.emit(event);
            }
        }
        Ok(())
    }

    fn advance(&mut self, next: HandshakeState) -> Result<(), CloseReason> {
        self.connection.transition(next)
            .map_err(|e| CloseReason::ProtocolViolation(e.to_string()))?;
        self.publish();
        Ok(())
    }

    fn set_flags<F: FnOnce(&mut PeerConnection)>(&mut self, update: F) {
        update(&mut self.connection);
        self.publish();
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.connection.clone());
    }

    fn emit(&self, event: PeerEvent) {
        let _ = self.events_tx.send((self.connection.conn_id, event));
    }

    fn finish(&mut self, reason: CloseReason) {
        if !self.connection.close(reason.clone()) {
            return;
        }
        match &reason {
            CloseReason::Cancelled | CloseReason::Paused | CloseReason::RemoteClosed => {
                debug!("[PEER] {} closed: {}", self.connection.remote, reason);
            }
            _ => {
                info!("[PEER] {} closed: {}", self.connection.remote, reason);
            }
        }
        self.publish();
        self.emit(PeerEvent::Closed { reason });
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

fn io_reason(error: WireError) -> CloseReason {
    match error {
        WireError::Io(error) if error.kind() == std::io::ErrorKind::UnexpectedEof => CloseReason::RemoteClosed,
        WireError::Io(error) => CloseReason::Io(error.to_string()),
        other => CloseReason::ProtocolViolation(other.to_string()),
    }
}

