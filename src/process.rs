// src/process.rs

//! Spawning and supervising the watched compiler process.
//!
//! The `Child` handle is moved into a dedicated wait task that calls
//! `child.wait()`, so the real exit code is captured and emitted as
//! [`RuntimeEvent::CompilerExited`]. `CompilerProcess` retains a oneshot
//! kill channel for shutdown and a second oneshot to await the wait task's
//! completion, so shutdown only returns once the compiler is reaped.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::engine::RuntimeEvent;
use crate::errors::{Result, WatchtscError};

/// Handle to the watched compiler.
pub struct CompilerProcess {
    pid: Option<u32>,
    kill_tx: Option<oneshot::Sender<()>>,
    done_rx: oneshot::Receiver<()>,
}

impl CompilerProcess {
    /// Spawn the compiler in watch mode with stdout/stderr piped.
    ///
    /// A missing executable is fatal to startup: no runtime is constructed
    /// and `main` exits with a distinct code.
    pub fn spawn(settings: &Settings, event_tx: mpsc::Sender<RuntimeEvent>) -> Result<Self> {
        let args = settings.effective_compiler_args();
        info!(compiler = %settings.compiler, ?args, "spawning compiler");

        let mut child = Command::new(&settings.compiler)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    WatchtscError::CompilerNotFound {
                        compiler: settings.compiler.clone(),
                    }
                } else {
                    WatchtscError::CompilerSpawn {
                        compiler: settings.compiler.clone(),
                        reason: err.to_string(),
                    }
                }
            })?;

        let pid = child.id();
        info!(pid, "compiler process started");

        let stdout = child.stdout.take().expect("stdout was configured");
        tokio::spawn(Self::stdout_reader(stdout, event_tx.clone()));

        let stderr = child.stderr.take().expect("stderr was configured");
        tokio::spawn(Self::stderr_reader(stderr));

        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        let (done_tx, done_rx) = oneshot::channel::<()>();
        tokio::spawn(Self::wait_for_exit(child, kill_rx, done_tx, event_tx));

        Ok(Self {
            pid,
            kill_tx: Some(kill_tx),
            done_rx,
        })
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Request termination and wait for the compiler to be reaped.
    ///
    /// Used on the shutdown path after every hook kill has settled; if the
    /// compiler already exited on its own this returns immediately.
    pub async fn shutdown(mut self) {
        if let Some(kill_tx) = self.kill_tx.take() {
            // Err here means the wait task already finished.
            let _ = kill_tx.send(());
        }
        let _ = self.done_rx.await;
    }

    /// Background task: feed compiler stdout lines into the runtime.
    async fn stdout_reader(stdout: ChildStdout, event_tx: mpsc::Sender<RuntimeEvent>) {
        let reader = BufReader::new(stdout);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            if event_tx
                .send(RuntimeEvent::CompilerLine { line })
                .await
                .is_err()
            {
                break;
            }
        }

        debug!("compiler stdout reader finished");
    }

    /// Background task: pass compiler stderr through to our stderr.
    async fn stderr_reader(stderr: ChildStderr) {
        let reader = BufReader::new(stderr);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            eprintln!("{line}");
        }

        debug!("compiler stderr reader finished");
    }

    /// Background task: owns `child`, waits for it to exit, emits
    /// `RuntimeEvent::CompilerExited`. A kill request short-circuits the
    /// wait and reaps the process.
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        done_tx: oneshot::Sender<()>,
        event_tx: mpsc::Sender<RuntimeEvent>,
    ) {
        tokio::select! {
            status_res = child.wait() => {
                match status_res {
                    Ok(status) => {
                        let code = status.code();
                        info!(?code, "compiler process exited");
                        let _ = event_tx
                            .send(RuntimeEvent::CompilerExited { code })
                            .await;
                    }
                    Err(err) => {
                        warn!(error = %err, "failed waiting for compiler process");
                        let _ = event_tx
                            .send(RuntimeEvent::CompilerExited { code: None })
                            .await;
                    }
                }
            }

            _ = kill_rx => {
                info!("shutdown requested; killing compiler process");
                if let Err(err) = child.kill().await {
                    warn!(error = %err, "failed to kill compiler process");
                }
                // No CompilerExited here: the runtime loop has already ended
                // when the kill path runs.
            }
        }

        let _ = done_tx.send(());
    }
}
