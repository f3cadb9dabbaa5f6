//! Room event definitions
//!
//! One `RoomEvent` is one unit of room activity. All events flow through a
//! single bounded queue consumed only by the broadcaster, which gives the
//! room its total order: no join, leave, or fan-out ever races another.

use crate::client::Client;
use crate::types::ClientId;

/// A unit of room activity, processed one at a time by the broadcaster
#[derive(Debug)]
pub enum RoomEvent {
    /// A new client joins the room; ownership of its mailbox handle
    /// transfers to the broadcaster
    Enter { client: Client },
    /// A client leaves the room; removing it drops the mailbox handle,
    /// which closes the mailbox and lets its writer drain and exit
    Leave { client_id: ClientId },
    /// A line of chat to fan out to every registered client
    Message { text: String },
}
