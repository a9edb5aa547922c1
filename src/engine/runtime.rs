// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::hooks::HookBackend;
use crate::ipc::Broadcaster;
use crate::output::Display;

use super::core::CompileCore;
use super::{CoreCommand, RuntimeEvent};

/// Drives the compilation state tracker in response to `RuntimeEvent`s,
/// and delegates hook restarts to a `HookBackend`.
///
/// This is a pure IO shell around `CompileCore`, which contains all the
/// state-machine semantics. This struct handles async IO: reading events
/// from the channel, forwarding compiler output to the terminal, emitting
/// observer messages, and dispatching hook restarts.
pub struct Runtime<B: HookBackend> {
    core: CompileCore,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    backend: B,
    broadcaster: Broadcaster,
    display: Display,
    /// Whether shutdown-time kill_all includes the first-success slot.
    kill_first_success_on_exit: bool,
}

impl<B: HookBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<B: HookBackend> Runtime<B> {
    pub fn new(
        core: CompileCore,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        backend: B,
        broadcaster: Broadcaster,
        display: Display,
        kill_first_success_on_exit: bool,
    ) -> Self {
        Self {
            core,
            event_rx,
            backend,
            broadcaster,
            display,
            kill_first_success_on_exit,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `RuntimeEvent`s from `event_rx`.
    /// - Feeds them into the pure core.
    /// - Executes commands returned by the core (emit, restart hooks, exit).
    ///
    /// Returns the process exit code once the core requests exit (compiler
    /// exit or shutdown signal). Before returning, every alive hook
    /// invocation is killed and the kills are awaited, so no hook process
    /// outlives the loop.
    pub async fn run(mut self) -> Result<i32> {
        info!("watchtsc runtime started");

        let mut exit_code = 0;

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            // Forward compiler output before acting on it, so hook output
            // never appears ahead of the line that triggered it.
            if let RuntimeEvent::CompilerLine { line } = &event {
                self.display.forward_line(line);
            }

            let step = self.core.step(event);

            for command in step.commands {
                match command {
                    CoreCommand::Emit(message) => self.broadcaster.emit(message).await,
                    CoreCommand::RestartHook(kind) => self.backend.restart(kind).await?,
                    CoreCommand::Exit { code } => exit_code = code,
                }
            }

            if !step.keep_running {
                info!(exit_code, "core requested exit; stopping runtime");
                break;
            }
        }

        self.backend
            .kill_all(self.kill_first_success_on_exit)
            .await?;

        info!("runtime exiting");
        Ok(exit_code)
    }
}
