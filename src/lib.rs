//! Many-to-many TCP Chat Server Library
//!
//! A line-based broadcast chat server: every line a client sends is
//! fanned out to everyone registered in the room, the sender included,
//! over plain TCP, newline delimited in both directions.
//!
//! # Features
//! - Single-actor room membership (no locks)
//! - Per-connection outbound writers with write coalescing
//! - A global limiter bounding concurrent flushes
//! - Arrival/departure announcements and a per-client greeting
//! - A load-generating benchmark client (`chatcast-bench`)
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `Broadcaster` is the single task owning the room; all joins, leaves
//!   and chat lines reach it as `RoomEvent`s on one bounded queue
//! - Each connection runs a handler task (reads lines, emits events) and
//!   a writer task (drains the client's mailbox to the socket)
//! - Writers coalesce queued lines into single flushes and share a fixed
//!   number of flush slots from the `WriteLimiter`
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use chatcast::{handle_connection, Broadcaster, WriteLimiter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("localhost:8000").await.unwrap();
//!     let (events, event_queue) = mpsc::channel(128);
//!     tokio::spawn(Broadcaster::new(event_queue).run());
//!     let limiter = WriteLimiter::new(2);
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         tokio::spawn(handle_connection(stream, events.clone(), limiter.clone()));
//!     }
//! }
//! ```

pub mod broadcaster;
pub mod cache;
pub mod client;
pub mod error;
pub mod event;
pub mod handler;
pub mod limiter;
pub mod room;
pub mod types;
pub mod writer;

// Re-export main types for convenience
pub use broadcaster::Broadcaster;
pub use cache::CachedQuery;
pub use client::{Client, MAILBOX_CAPACITY};
pub use error::{AppError, SendError};
pub use event::RoomEvent;
pub use handler::handle_connection;
pub use limiter::{WriteLimiter, WriteSlot};
pub use room::Room;
pub use types::ClientId;
pub use writer::client_writer;
