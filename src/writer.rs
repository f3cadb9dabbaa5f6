//! Outbound writer task
//!
//! One instance runs per connection, draining that client's mailbox into
//! the write half of its transport. Queued lines accumulate in a local
//! buffer and go out as one write, so a burst of short lines costs one
//! flush instead of many; each flush holds a slot from the global
//! [`WriteLimiter`](crate::limiter::WriteLimiter) for its duration.
//!
//! The task is a small state machine:
//! - buffer empty: wait on the mailbox only
//! - buffer non-empty: race the mailbox against limiter admission and
//!   service whichever is ready first (no fairness between the two)
//! - mailbox closed: one final flush of anything left, taken without a
//!   slot, then shut the transport down and exit

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::limiter::WriteLimiter;

/// Drain `mailbox` into `conn` until the mailbox closes.
///
/// Write failures terminate the task immediately; the transport is
/// presumed broken and the failure is not reported anywhere else. The
/// connection handler notices only through its own read loop ending.
pub async fn client_writer<W>(mut conn: W, mut mailbox: mpsc::Receiver<String>, limiter: WriteLimiter)
where
    W: AsyncWrite + Unpin,
{
    let mut buf: Vec<u8> = Vec::new();

    loop {
        if buf.is_empty() {
            // Idle: nothing to flush, so don't compete for a slot
            match mailbox.recv().await {
                Some(line) => push_line(&mut buf, &line),
                None => break,
            }
        } else {
            tokio::select! {
                received = mailbox.recv() => match received {
                    Some(line) => push_line(&mut buf, &line),
                    None => break,
                },
                slot = limiter.acquire() => {
                    trace!("flushing {} bytes", buf.len());
                    let result = conn.write_all(&buf).await;
                    drop(slot);
                    buf.clear();
                    if let Err(e) = result {
                        debug!("write failed, dropping connection: {}", e);
                        let _ = conn.shutdown().await;
                        return;
                    }
                }
            }
        }
    }

    // Mailbox closed: one last flush of whatever is buffered, no slot
    // needed, outcome ignored. Shutdown half-closes the transport so the
    // peer sees EOF.
    let _ = conn.write_all(&buf).await;
    let _ = conn.shutdown().await;
    debug!("writer drained and exiting");
}

fn push_line(buf: &mut Vec<u8>, line: &str) {
    buf.extend_from_slice(line.as_bytes());
    buf.push(b'\n');
}
