use crate::config::RelayConfig;
use crate::telemetry::events::TelemetryMessage;
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

/// Pause after a failed accept so a persistent error (out of file
/// descriptors) does not spin.
pub const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

static CONFIG: LazyLock<RelayConfig> = LazyLock::new(RelayConfig::from_env);

static TELEMETRY_CHANNEL: LazyLock<broadcast::Sender<String>> = LazyLock::new(|| {
    let (tx, _) = broadcast::channel(CONFIG.channel_capacity);
    tx
});

static INGEST_STARTED: AtomicBool = AtomicBool::new(false);

pub fn channel() -> &'static broadcast::Sender<String> {
    &TELEMETRY_CHANNEL
}

/// Fan a raw message out to every connected dashboard. Messages that would
/// not decode on the dashboard are dropped here. Returns whether the message
/// was forwarded.
pub fn publish(tx: &broadcast::Sender<String>, raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }
    if TelemetryMessage::parse(raw).is_none() {
        warn!("Dropping malformed telemetry: {}", raw);
        return false;
    }

    // Ignore SendError (happens if no subscribers)
    match tx.send(raw.to_string()) {
        Ok(n) => debug!("Relayed telemetry to {} dashboard(s)", n),
        Err(_) => debug!("Relayed telemetry with no dashboards connected"),
    }
    true
}

/// Bind the ingest socket once per process. A failed bind is retried by the
/// next caller.
pub fn start_ingest_listener() {
    if INGEST_STARTED.load(Ordering::Relaxed) || INGEST_STARTED.swap(true, Ordering::SeqCst) {
        return;
    }

    tokio::spawn(async move {
        let config = &*CONFIG;
        match TcpListener::bind(&config.ingest_addr).await {
            Ok(listener) => {
                info!("Telemetry ingest listening on {}", config.ingest_addr);
                serve(listener, channel().clone(), config.max_line_length).await;
            }
            Err(e) => {
                error!("Cannot bind telemetry ingest on {}: {}", config.ingest_addr, e);
                INGEST_STARTED.store(false, Ordering::SeqCst);
            }
        }
    });
}

/// Accept device connections until the listener fails.
pub async fn serve(listener: TcpListener, tx: broadcast::Sender<String>, max_line_length: usize) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                info!("Telemetry source connected from {}", peer);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let forwarded = read_lines(stream, &tx, max_line_length).await;
                    info!("Telemetry source {} disconnected after {} message(s)", peer, forwarded);
                });
            }
            Err(e) => {
                warn!("Failed to accept telemetry connection: {}", e);
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }
}

/// Forward each line of one source. The source is dropped on an oversized
/// line. Returns how many messages were forwarded.
pub async fn read_lines<R>(source: R, tx: &broadcast::Sender<String>, max_line_length: usize) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut lines = FramedRead::new(source, LinesCodec::new_with_max_length(max_line_length));
    let mut forwarded = 0;

    while let Some(line) = lines.next().await {
        match line {
            Ok(line) => {
                if publish(tx, &line) {
                    forwarded += 1;
                }
            }
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                warn!("Telemetry line longer than {} bytes, closing source", max_line_length);
                break;
            }
            Err(LinesCodecError::Io(e)) => {
                warn!("Telemetry connection error: {}", e);
                break;
            }
        }
    }
    forwarded
}
