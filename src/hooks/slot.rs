// src/hooks/slot.rs

//! Per-kind hook slot actor.
//!
//! Each configured hook kind gets one background task that owns the
//! `Option<Child>` for that slot. All kill/spawn operations for the slot go
//! through its request channel, so two restarts of the same slot can never
//! interleave; restarts of different slots are independent.

use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::hooks::HookKind;

/// Requests accepted by a slot actor.
#[derive(Debug)]
pub(crate) enum SlotRequest {
    /// Kill the current invocation (if alive), then spawn a new one.
    Restart,
    /// Kill the current invocation (if alive) and acknowledge on `done`.
    /// Killing with no live invocation is a successful no-op.
    Kill { done: oneshot::Sender<()> },
}

/// Spawn the actor task for one hook slot and return its request channel.
pub(crate) fn spawn_slot(kind: HookKind, command: String) -> mpsc::Sender<SlotRequest> {
    let (tx, rx) = mpsc::channel::<SlotRequest>(8);
    tokio::spawn(slot_loop(kind, command, rx));
    tx
}

async fn slot_loop(kind: HookKind, command: String, mut rx: mpsc::Receiver<SlotRequest>) {
    debug!(hook = kind.as_str(), cmd = %command, "hook slot started");

    // At most one invocation per slot; kill_on_drop covers the case where
    // the actor itself is torn down with a child still alive.
    let mut current: Option<Child> = None;

    while let Some(request) = rx.recv().await {
        match request {
            SlotRequest::Restart => {
                kill_current(kind, &mut current).await;

                match spawn_hook(&command) {
                    Ok(child) => {
                        info!(
                            hook = kind.as_str(),
                            pid = child.id(),
                            "hook started"
                        );
                        current = Some(child);
                    }
                    Err(err) => {
                        // Hooks are fire-and-forget: a spawn failure is
                        // reported once and does not stop the watcher.
                        warn!(
                            hook = kind.as_str(),
                            cmd = %command,
                            error = %err,
                            "failed to spawn hook command"
                        );
                    }
                }
            }
            SlotRequest::Kill { done } => {
                kill_current(kind, &mut current).await;
                let _ = done.send(());
            }
        }
    }

    debug!(hook = kind.as_str(), "hook slot finished (channel closed)");
}

/// Terminate the slot's current invocation, waiting for it to be reaped.
async fn kill_current(kind: HookKind, current: &mut Option<Child>) {
    let Some(mut child) = current.take() else {
        return;
    };

    match child.try_wait() {
        Ok(Some(status)) => {
            debug!(hook = kind.as_str(), ?status, "previous hook already exited");
        }
        _ => {
            debug!(hook = kind.as_str(), "killing previous hook invocation");
            if let Err(err) = child.kill().await {
                warn!(
                    hook = kind.as_str(),
                    error = %err,
                    "failed to kill previous hook invocation"
                );
            }
        }
    }
}

/// Spawn a hook command through the platform shell.
///
/// The hook's stdout/stderr are inherited; the command has no structured
/// I/O contract beyond its command line.
fn spawn_hook(command: &str) -> std::io::Result<Child> {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    cmd.spawn()
}
