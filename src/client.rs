//! Client mailbox handle
//!
//! A `Client` is the sending side of one connection's outbound mailbox:
//! a bounded queue of text lines drained by that connection's writer task.
//! The mailbox *is* the client's identity; the `ClientId` token stands for
//! it in room membership and in events.

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::types::ClientId;

/// Capacity of each client's outbound mailbox, in queued lines.
///
/// When a mailbox is full, fan-out blocks on it (see `Room::broadcast`).
pub const MAILBOX_CAPACITY: usize = 128;

/// Handle to one connected client's outbound mailbox
#[derive(Debug)]
pub struct Client {
    /// Token standing for this mailbox
    pub id: ClientId,
    /// Sending side of the mailbox; dropping the last clone closes it
    sender: mpsc::Sender<String>,
}

impl Client {
    /// Create a client handle and the receiving side of its mailbox.
    ///
    /// The receiver goes to the connection's writer task; the handle is
    /// registered with the broadcaster via an `Enter` event.
    pub fn mailbox(id: ClientId) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
        (Self { id, sender }, receiver)
    }

    /// Queue one line for this client, waiting if the mailbox is full.
    ///
    /// Returns an error if the mailbox is closed (writer task gone).
    pub async fn send(&self, line: String) -> Result<(), SendError> {
        self.sender
            .send(line)
            .await
            .map_err(|_| SendError::MailboxClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mailbox_delivers_in_order() {
        let (client, mut rx) = Client::mailbox(ClientId::new());

        client.send("first".to_string()).await.unwrap();
        client.send("second".to_string()).await.unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("first"));
        assert_eq!(rx.recv().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_send_fails_after_receiver_dropped() {
        let (client, rx) = Client::mailbox(ClientId::new());
        drop(rx);

        let result = client.send("lost".to_string()).await;
        assert!(matches!(result, Err(SendError::MailboxClosed)));
    }

    #[tokio::test]
    async fn test_dropping_handle_closes_mailbox() {
        let (client, mut rx) = Client::mailbox(ClientId::new());
        client.send("last".to_string()).await.unwrap();
        drop(client);

        assert_eq!(rx.recv().await.as_deref(), Some("last"));
        assert!(rx.recv().await.is_none());
    }
}
