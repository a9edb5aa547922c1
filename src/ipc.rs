// src/ipc.rs

//! Event broadcasting and inbound manual-trigger channel.
//!
//! When `--ipc <path>` is given, watchtsc connects to a Unix domain socket
//! owned by the parent process. Outbound, every [`EventMessage`] is written
//! as one line in emission order. Inbound, the parent can send one of the
//! five literal trigger tokens (see [`HookKind::from_trigger_token`]) to
//! manually re-run a hook; unrecognized tokens are logged and ignored.
//!
//! Without `--ipc`, [`Broadcaster::emit`] is a silent no-op and there is no
//! trigger channel.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::{EventMessage, RuntimeEvent};
use crate::errors::Result;
use crate::hooks::HookKind;

/// Outbound side of the observer channel.
///
/// Messages are forwarded through a channel to a single writer task, so the
/// wire order matches the emission order exactly.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: Option<mpsc::Sender<EventMessage>>,
}

impl Broadcaster {
    /// Broadcaster with no observer attached; `emit` does nothing.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Broadcaster forwarding messages into `tx`. Used by [`connect`] and
    /// directly by tests that want to observe emissions.
    pub fn attached(tx: mpsc::Sender<EventMessage>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Send one message to the observer. Never an error: a missing or
    /// disappeared observer turns emission into a no-op.
    pub async fn emit(&self, message: EventMessage) {
        let Some(tx) = &self.tx else {
            return;
        };

        if tx.send(message).await.is_err() {
            debug!("observer channel closed; dropping event message");
        }
    }
}

/// Connect to the parent's socket and spawn the reader/writer tasks.
///
/// The returned broadcaster feeds the writer task; inbound trigger tokens
/// are decoded and sent to the runtime as [`RuntimeEvent::ManualTrigger`].
#[cfg(unix)]
pub async fn connect(
    path: &std::path::Path,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<Broadcaster> {
    use anyhow::Context;
    use tokio::net::UnixStream;

    let stream = UnixStream::connect(path)
        .await
        .with_context(|| format!("connecting to ipc socket at {path:?}"))?;

    let (read_half, write_half) = stream.into_split();

    let (out_tx, out_rx) = mpsc::channel::<EventMessage>(64);
    tokio::spawn(writer_loop(write_half, out_rx));
    tokio::spawn(reader_loop(read_half, runtime_tx));

    Ok(Broadcaster::attached(out_tx))
}

#[cfg(not(unix))]
pub async fn connect(
    path: &std::path::Path,
    _runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<Broadcaster> {
    Err(crate::errors::WatchtscError::ConfigError(format!(
        "--ipc is only supported on Unix platforms (got {path:?})"
    )))
}

#[cfg(unix)]
async fn writer_loop(
    mut write_half: tokio::net::unix::OwnedWriteHalf,
    mut out_rx: mpsc::Receiver<EventMessage>,
) {
    use tokio::io::AsyncWriteExt;

    while let Some(message) = out_rx.recv().await {
        let line = format!("{}\n", message.wire_format());
        if let Err(err) = write_half.write_all(line.as_bytes()).await {
            debug!(error = %err, "ipc write failed; stopping broadcaster");
            break;
        }
    }

    debug!("ipc writer finished");
}

#[cfg(unix)]
async fn reader_loop(
    read_half: tokio::net::unix::OwnedReadHalf,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    use tokio::io::{AsyncBufReadExt, BufReader};

    let reader = BufReader::new(read_half);
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match HookKind::from_trigger_token(&line) {
            Some(kind) => {
                debug!(hook = kind.as_str(), "manual trigger received");
                if runtime_tx
                    .send(RuntimeEvent::ManualTrigger { kind })
                    .await
                    .is_err()
                {
                    break;
                }
            }
            None => {
                warn!(token = %line.trim(), "unknown ipc trigger token; ignoring");
            }
        }
    }

    debug!("ipc reader finished");
}
