//! Basic type definitions for the chat server
//!
//! Provides the `ClientId` newtype: the opaque token standing for one
//! client mailbox. A fresh id is minted per accepted connection and never
//! reused, so id equality is mailbox identity.

use uuid::Uuid;

/// Unique client identifier (newtype pattern)
///
/// Wraps a UUID v4 for type-safe client identification.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Create a new random client ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
