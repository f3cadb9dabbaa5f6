//! Room broadcaster actor
//!
//! The single task that owns room membership. Every join, leave, and chat
//! line reaches it as a [`RoomEvent`] through one bounded queue, and it
//! processes them strictly in arrival order, so membership changes never
//! race fan-out and every client observes messages in the same relative
//! order.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::event::RoomEvent;
use crate::room::Room;

/// The room broadcaster actor
///
/// Holds the authoritative membership set and fans chat lines out to
/// every registered mailbox. Spawned exactly once at process start.
pub struct Broadcaster {
    room: Room,
    events: mpsc::Receiver<RoomEvent>,
}

impl Broadcaster {
    /// Create a broadcaster consuming from the given event queue
    pub fn new(events: mpsc::Receiver<RoomEvent>) -> Self {
        Self {
            room: Room::new(),
            events,
        }
    }

    /// Run the event loop until every event sender is gone
    pub async fn run(mut self) {
        info!("broadcaster started");

        while let Some(event) = self.events.recv().await {
            self.handle_event(event).await;
        }

        info!("broadcaster shutting down");
    }

    /// Process a single event
    async fn handle_event(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::Enter { client } => {
                info!("client {} entered the room", client.id);
                self.room.insert(client);
                debug!("room size: {}", self.room.len());
            }
            RoomEvent::Leave { client_id } => {
                info!("client {} left the room", client_id);
                // Dropping the handle closes the mailbox, signalling the
                // client's writer to drain and exit
                drop(self.room.remove(client_id));
                debug!("room size: {}", self.room.len());
            }
            RoomEvent::Message { text } => {
                self.room.broadcast(&text).await;
            }
        }
    }
}
