//! Per-connection protocol loop.
//!
//! Receives chunks from the transport, recognizes in-band seek control
//! commands, drives the shared device, and streams history bytes back to
//! the client. The device mutex is never held across an `.await`: every
//! device call copies into a connection-local buffer and returns before
//! the socket send.

use crate::control;
use crate::error::ServerError;
use cmdring::{Device, DeviceError, Handle};
use std::io::SeekFrom;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::warn;

/// Runs one connection until the client disconnects or the transport dies.
///
/// Device errors are logged and the loop continues; transport errors are
/// returned to the supervisor.
pub(crate) async fn serve(
    mut stream: TcpStream,
    peer: SocketAddr,
    device: Arc<Device>,
    chunk_size: usize,
) -> Result<(), ServerError> {
    let mut handle = device.open();
    let mut chunk = vec![0u8; chunk_size];
    let mut response = vec![0u8; chunk_size];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            // Client closed its end.
            return Ok(());
        }
        let received = &chunk[..n];

        if let Some((cmd, offset)) = control::parse_seek(received) {
            match handle.seek_to_command(cmd, offset) {
                Ok(_) => {
                    // Control commands are not written to the history; the
                    // reply is the history from the new position onward.
                    send_history(&mut stream, &mut handle, &mut response, peer).await?;
                    continue;
                }
                // Validation failed: the chunk is ordinary data after all.
                Err(DeviceError::InvalidArgument) => {}
                Err(err) => {
                    warn!(%peer, %err, "seek-to-command failed");
                    continue;
                }
            }
        }

        match handle.write(received) {
            Ok(_) => {}
            Err(err) if err.is_recoverable() => {
                warn!(%peer, %err, "write failed, chunk dropped");
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        if received.contains(&b'\n') {
            // A command completed: reply with the entire current history.
            match handle.seek(SeekFrom::Start(0)) {
                Ok(_) => send_history(&mut stream, &mut handle, &mut response, peer).await?,
                Err(err) => warn!(%peer, %err, "rewind before echo failed"),
            }
        }
    }
}

/// Streams the history from the handle's current position to end-of-data.
///
/// Leaves the handle at end-of-data. A device error mid-stream is logged
/// and truncates the reply; only transport errors propagate.
async fn send_history(
    stream: &mut TcpStream,
    handle: &mut Handle,
    buf: &mut [u8],
    peer: SocketAddr,
) -> Result<(), ServerError> {
    loop {
        let n = match handle.read(buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(err) => {
                warn!(%peer, %err, "device read failed, reply truncated");
                return Ok(());
            }
        };
        stream.write_all(&buf[..n]).await?;
    }
}
