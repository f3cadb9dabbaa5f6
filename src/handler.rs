//! TCP connection handler
//!
//! Bridges one client's connection to the room: spawns the outbound
//! writer on the write half, announces the arrival, then turns every
//! inbound line into a `Message` event until the stream ends. Read errors
//! are treated the same as end-of-stream; the connection just leaves.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::client::Client;
use crate::error::AppError;
use crate::event::RoomEvent;
use crate::limiter::WriteLimiter;
use crate::types::ClientId;
use crate::writer::client_writer;

/// Handle one accepted connection until the client goes away.
///
/// The client is addressed by its peer address in all room traffic:
/// greeting, arrival and departure announcements, and the `<addr>: <line>`
/// prefix on every chat line. Errors here mean the broadcaster is gone,
/// which only happens at process teardown.
pub async fn handle_connection(
    stream: TcpStream,
    events: mpsc::Sender<RoomEvent>,
    limiter: WriteLimiter,
) -> Result<(), AppError> {
    let who = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let client_id = ClientId::new();
    info!("client {} connected from {}", client_id, who);

    let (read_half, write_half) = stream.into_split();
    let (client, mailbox) = Client::mailbox(client_id);
    let writer = tokio::spawn(client_writer(write_half, mailbox, limiter));

    // Greeting goes straight into the mailbox; the room has not seen this
    // client yet, so it is the only one to receive it
    client
        .send(format!("You are {who}"))
        .await
        .map_err(|_| AppError::ChannelSend)?;

    // Arrival first, then registration: the newcomer does not get its own
    // announcement
    events
        .send(RoomEvent::Message {
            text: format!("{who} has arrived"),
        })
        .await
        .map_err(|_| AppError::ChannelSend)?;
    events
        .send(RoomEvent::Enter { client })
        .await
        .map_err(|_| AppError::ChannelSend)?;

    let mut lines = BufReader::new(read_half).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                events
                    .send(RoomEvent::Message {
                        text: format!("{who}: {line}"),
                    })
                    .await
                    .map_err(|_| AppError::ChannelSend)?;
            }
            Ok(None) => break,
            Err(e) => {
                // A failed read ends the session like a clean EOF would
                debug!("read error from {}: {}", who, e);
                break;
            }
        }
    }

    events
        .send(RoomEvent::Leave { client_id })
        .await
        .map_err(|_| AppError::ChannelSend)?;
    events
        .send(RoomEvent::Message {
            text: format!("{who} has left"),
        })
        .await
        .map_err(|_| AppError::ChannelSend)?;

    // The Leave above closes the mailbox, so the writer drains and exits
    let _ = writer.await;
    info!("client {} disconnected", client_id);

    Ok(())
}
