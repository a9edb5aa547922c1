// src/lib.rs

pub mod classify;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod hooks;
pub mod ipc;
pub mod logging;
pub mod output;
pub mod process;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::resolve_settings;
use crate::engine::{CompileCore, Runtime, RuntimeEvent};
use crate::errors::Result;
use crate::hooks::HookManager;
use crate::ipc::Broadcaster;
use crate::output::Display;
use crate::process::CompilerProcess;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI merge)
/// - the hook manager
/// - the optional IPC channel to a parent process
/// - the watched compiler process
/// - Ctrl-C handling
///
/// Returns the process exit code: the compiler's own code when it exits,
/// zero on signal-driven shutdown.
pub async fn run(args: CliArgs) -> Result<i32> {
    let settings = resolve_settings(&args)?;

    // Runtime event channel: compiler readers, ipc reader, and the signal
    // handler all feed this.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // Observer channel (no-op broadcaster when --ipc is absent).
    let broadcaster = match &settings.ipc_path {
        Some(path) => ipc::connect(path, rt_tx.clone()).await?,
        None => Broadcaster::disabled(),
    };

    // One slot actor per configured hook.
    let backend = HookManager::new(&settings.hooks);

    // The watched compiler. A missing executable fails here, before any
    // state machine exists.
    let compiler = CompilerProcess::spawn(&settings, rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(
        CompileCore::new(),
        rt_rx,
        backend,
        broadcaster,
        Display::from_settings(&settings),
        !settings.keep_first_success_on_exit,
    );

    // The runtime kills all hooks (and awaits the kills) before returning;
    // only then is the compiler itself terminated and reaped.
    let exit_code = runtime.run().await?;
    compiler.shutdown().await;

    info!(exit_code, "watchtsc finished");
    Ok(exit_code)
}

// Re-exported for integration tests and external embedding.
pub use engine::{CoreCommand, CoreStep, EventMessage};
pub use hooks::{HookBackend, HookCommands, HookKind};
