//! Room membership set
//!
//! The set of currently-registered client mailboxes. Owned exclusively by
//! the broadcaster task; nothing else reads or mutates it, so no lock
//! guards it.

use std::collections::HashMap;

use crate::client::Client;
use crate::types::ClientId;

/// Membership set of the one chat room
#[derive(Debug, Default)]
pub struct Room {
    clients: HashMap<ClientId, Client>,
}

impl Room {
    /// Create an empty room
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Register a client's mailbox handle
    pub fn insert(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    /// Unregister a client, returning its mailbox handle if it was present.
    ///
    /// Letting the returned handle drop closes the mailbox.
    pub fn remove(&mut self, client_id: ClientId) -> Option<Client> {
        self.clients.remove(&client_id)
    }

    /// Check whether a client is currently registered
    pub fn contains(&self, client_id: ClientId) -> bool {
        self.clients.contains_key(&client_id)
    }

    /// Number of registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Check whether the room has no clients
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Queue one line into every registered client's mailbox.
    ///
    /// Enqueueing blocks while a mailbox is full, which stalls delivery to
    /// every other client until the slow reader frees a slot. That is the
    /// accepted cost of a single totally-ordered fan-out point. A mailbox
    /// whose writer has already gone away is skipped.
    pub async fn broadcast(&self, text: &str) {
        for client in self.clients.values() {
            let _ = client.send(text.to_string()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_membership() {
        let mut room = Room::new();
        assert!(room.is_empty());

        let id1 = ClientId::new();
        let id2 = ClientId::new();
        let (client1, _rx1) = Client::mailbox(id1);
        let (client2, _rx2) = Client::mailbox(id2);

        room.insert(client1);
        room.insert(client2);
        assert_eq!(room.len(), 2);
        assert!(room.contains(id1));
        assert!(room.contains(id2));

        let removed = room.remove(id1);
        assert!(removed.is_some());
        assert!(!room.contains(id1));
        assert_eq!(room.len(), 1);

        // Removing again is a no-op
        assert!(room.remove(id1).is_none());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_registered() {
        let mut room = Room::new();
        let (client1, mut rx1) = Client::mailbox(ClientId::new());
        let (client2, mut rx2) = Client::mailbox(ClientId::new());
        room.insert(client1);
        room.insert(client2);

        room.broadcast("hello").await;

        assert_eq!(rx1.recv().await.as_deref(), Some("hello"));
        assert_eq!(rx2.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_broadcast_skips_removed_client() {
        let mut room = Room::new();
        let id1 = ClientId::new();
        let (client1, mut rx1) = Client::mailbox(id1);
        let (client2, mut rx2) = Client::mailbox(ClientId::new());
        room.insert(client1);
        room.insert(client2);

        drop(room.remove(id1));
        room.broadcast("late").await;

        // Removed client's mailbox is closed, nothing was delivered
        assert!(rx1.recv().await.is_none());
        assert_eq!(rx2.recv().await.as_deref(), Some("late"));
    }

    #[tokio::test]
    async fn test_broadcast_survives_dead_writer() {
        let mut room = Room::new();
        let (client1, rx1) = Client::mailbox(ClientId::new());
        let (client2, mut rx2) = Client::mailbox(ClientId::new());
        room.insert(client1);
        room.insert(client2);

        // Writer side died without a Leave yet
        drop(rx1);

        room.broadcast("still going").await;
        assert_eq!(rx2.recv().await.as_deref(), Some("still going"));
    }
}
