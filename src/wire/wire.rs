use std::time::Duration;
use byteorder::{BigEndian, ByteOrder};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use crate::wire::enums::message::Message;
use crate::wire::enums::wire_error::WireError;
use crate::wire::structs::handshake::Handshake;

pub const PROTOCOL_STRING: &[u8; 19] = b"BitTorrent protocol";
pub const HANDSHAKE_LEN: usize = 68;

/// Reserved byte 5, bit 0x10 advertises BEP 10 support.
pub const EXTENSION_BYTE: usize = 5;
pub const EXTENSION_BIT: u8 = 0x10;

pub const EXTENDED_MESSAGE_ID: u8 = 20;
pub const EXTENDED_HANDSHAKE_ID: u8 = 0;
pub const METADATA_EXTENSION_NAME: &str = "ut_metadata";

/// The id we ask remotes to use when sending us `ut_metadata` messages.
pub const LOCAL_METADATA_ID: u8 = 2;

pub const METADATA_PIECE_SIZE: usize = 16384;

/// Largest frame body accepted from a peer.
pub const MAX_FRAME_LEN: u32 = 1024 * 1024 + 13;

pub const CLIENT_NAME: &str = concat!("magnet-swarm/", env!("CARGO_PKG_VERSION"));

pub async fn read_handshake<R>(reader: &mut R) -> Result<Handshake, WireError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = [0u8; HANDSHAKE_LEN];
    reader.read_exact(&mut buffer).await?;
    Handshake::from_bytes(&buffer)
}

pub async fn read_handshake_timeout<R>(reader: &mut R, timeout: Duration) -> Result<Handshake, WireError>
where
    R: AsyncRead + Unpin,
{
    match tokio::time::timeout(timeout, read_handshake(reader)).await {
        Ok(result) => result,
        Err(_) => Err(WireError::Io(std::io::Error::new(std::io::ErrorKind::TimedOut, "handshake timed out"))),
    }
}

pub async fn write_handshake<W>(writer: &mut W, handshake: &Handshake) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&handshake.to_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one length-prefixed frame. A zero length yields [`Message::KeepAlive`].
pub async fn read_message<R>(reader: &mut R, max_len: u32) -> Result<Message, WireError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix).await?;
    let length = BigEndian::read_u32(&prefix);
    if length == 0 {
        return Ok(Message::KeepAlive);
    }
    if length > max_len {
        return Err(WireError::FrameTooLarge(length));
    }
    let mut frame = vec![0u8; length as usize];
    reader.read_exact(&mut frame).await?;
    Message::from_frame(&frame)
}

pub async fn write_message<W>(writer: &mut W, message: &Message) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&message.to_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
