//! Chat server entry point
//!
//! Binds the TCP listener, starts the broadcaster actor, and accepts
//! connections forever.

use std::env;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chatcast::{handle_connection, Broadcaster, WriteLimiter};

/// Default listen address
const DEFAULT_ADDR: &str = "localhost:8000";

/// Capacity of the room event queue; producers block when it fills
const EVENT_QUEUE_CAPACITY: usize = 128;

/// How many outbound flushes may be in flight at once, process-wide
const MAX_CONCURRENT_FLUSHES: usize = 2;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chatcast=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatcast=info")),
        )
        .init();

    // Get bind address from command line or use default
    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    // Failing to bind is the one fatal error
    let listener = TcpListener::bind(&addr).await?;
    info!("chat server listening on {}", addr);

    let (events, event_queue) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    tokio::spawn(Broadcaster::new(event_queue).run());

    let limiter = WriteLimiter::new(MAX_CONCURRENT_FLUSHES);

    // Connection accept loop; accept errors are logged and skipped
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                info!("new connection from {}", peer);
                let events = events.clone();
                let limiter = limiter.clone();

                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, events, limiter).await {
                        error!("connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("failed to accept connection: {}", e);
            }
        }
    }
}
