//! Error types for the chat server
//!
//! Uses thiserror for ergonomic error definitions. The taxonomy is small
//! on purpose: transport failures end the affected session only and are
//! handled where they are observed, never surfaced across components.

use thiserror::Error;

/// Application-level errors
///
/// Covers the fatal conditions a connection handler or binary can hit.
/// Failing to bind the listening endpoint is the only error that takes
/// the whole process down.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (fatal for the operation that observed it)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send error (internal channel closed)
    #[error("Channel send error")]
    ChannelSend,
}

/// Message send errors
///
/// Occurs when attempting to deliver to a closed mailbox.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the mailbox has been closed
    #[error("Mailbox closed")]
    MailboxClosed,
}
