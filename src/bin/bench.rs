//! Load-generating benchmark client for the chat server
//!
//! Opens `--clients` connections, waits until all are established, then
//! fires a shared start signal. Each client writes `--messages` copies of
//! a fixed payload, half-closes its write side, and discards everything
//! it reads until the server closes the connection. The tool prints the
//! wall-clock time from the start signal until every session finished.

use std::time::Instant;

use clap::Parser;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Fixed payload each client sends, one copy per message
const PAYLOAD: &[u8] = b"Hello, World\n";

#[derive(Debug, Parser)]
#[command(name = "chatcast-bench", about = "Load generator for the chat server")]
struct Args {
    /// Number of concurrent client connections
    #[arg(long, default_value_t = 100)]
    clients: usize,

    /// Number of messages each client sends
    #[arg(long, default_value_t = 1000)]
    messages: usize,

    /// Server address to connect to
    #[arg(long, default_value = "localhost:8000")]
    addr: String,
}

/// One client session: discard input, send the payload burst on the
/// start signal, half-close, then wait for the server-side EOF.
async fn run_session(
    stream: TcpStream,
    mut start: watch::Receiver<bool>,
    messages: usize,
) -> Result<(), std::io::Error> {
    let (mut read_half, mut write_half) = stream.into_split();

    let reader = tokio::spawn(async move {
        let _ = tokio::io::copy(&mut read_half, &mut tokio::io::sink()).await;
    });

    // Hold until the start gun fires so all clients burst together
    let _ = start.changed().await;

    for _ in 0..messages {
        write_half.write_all(PAYLOAD).await?;
    }
    write_half.shutdown().await?;

    let _ = reader.await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let (start_gun, start) = watch::channel(false);

    // Connect everything before the clock starts
    let mut sessions = Vec::with_capacity(args.clients);
    for _ in 0..args.clients {
        let stream = TcpStream::connect(&args.addr).await?;
        sessions.push(tokio::spawn(run_session(
            stream,
            start.clone(),
            args.messages,
        )));
    }
    drop(start);

    let t0 = Instant::now();
    let _ = start_gun.send(true);

    for session in sessions {
        match session.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("session failed: {}", e),
            Err(e) => error!("session panicked: {}", e),
        }
    }

    println!("{:?}", t0.elapsed());
    Ok(())
}
