// src/hooks/mod.rs

//! Hook lifecycle management.
//!
//! Each lifecycle event can run a user-configured external command (a
//! "hook"). Per hook kind, at most one invocation is alive at any instant:
//! triggering a hook first terminates the previous invocation (and waits for
//! it to die) before spawning the next.
//!
//! - [`slot`] owns the per-kind actor task that serializes kill+spawn.
//! - [`manager`] provides the production [`HookManager`].
//! - The [`HookBackend`] trait lets tests replace the manager with a fake
//!   that records restarts instead of spawning processes.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub mod manager;
pub mod slot;

pub use manager::HookManager;

/// The five hook kinds, one lifecycle slot each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Fires at most once per process lifetime, on the first success.
    FirstSuccess,
    /// Fires on every successful compilation.
    Success,
    /// Fires when a compilation completes with errors.
    Failure,
    /// Fires when a compilation cycle starts.
    CompilationStarted,
    /// Fires when a compilation cycle completes, before the
    /// success/failure split.
    CompilationComplete,
}

impl HookKind {
    pub const ALL: [HookKind; 5] = [
        HookKind::FirstSuccess,
        HookKind::Success,
        HookKind::Failure,
        HookKind::CompilationStarted,
        HookKind::CompilationComplete,
    ];

    /// Decode an inbound manual-trigger token from the IPC channel.
    /// Unknown tokens yield `None`; the caller logs and ignores them.
    pub fn from_trigger_token(token: &str) -> Option<HookKind> {
        match token.trim() {
            "run-on-first-success-command" => Some(HookKind::FirstSuccess),
            "run-on-success-command" => Some(HookKind::Success),
            "run-on-failure-command" => Some(HookKind::Failure),
            "run-on-compilation-started-command" => Some(HookKind::CompilationStarted),
            "run-on-compilation-complete-command" => Some(HookKind::CompilationComplete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::FirstSuccess => "first-success",
            HookKind::Success => "success",
            HookKind::Failure => "failure",
            HookKind::CompilationStarted => "compilation-started",
            HookKind::CompilationComplete => "compilation-complete",
        }
    }
}

/// Configured hook commands, one optional command string per kind.
#[derive(Debug, Clone, Default)]
pub struct HookCommands {
    pub first_success: Option<String>,
    pub success: Option<String>,
    pub failure: Option<String>,
    pub compilation_started: Option<String>,
    pub compilation_complete: Option<String>,
}

impl HookCommands {
    pub fn command_for(&self, kind: HookKind) -> Option<&str> {
        let cmd = match kind {
            HookKind::FirstSuccess => &self.first_success,
            HookKind::Success => &self.success,
            HookKind::Failure => &self.failure,
            HookKind::CompilationStarted => &self.compilation_started,
            HookKind::CompilationComplete => &self.compilation_complete,
        };
        cmd.as_deref()
    }

    /// Iterate over the kinds that actually have a command configured.
    pub fn iter_configured(&self) -> impl Iterator<Item = (HookKind, &str)> {
        HookKind::ALL
            .into_iter()
            .filter_map(|kind| self.command_for(kind).map(|cmd| (kind, cmd)))
    }
}

/// Trait abstracting how hook restarts are executed.
///
/// Production code uses [`HookManager`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait HookBackend: Send {
    /// Kill-then-restart the hook for `kind`. No-op for unconfigured kinds.
    ///
    /// The returned future resolves once the restart request is enqueued on
    /// the slot, not once the new invocation is running: the event loop must
    /// keep processing lines while a slow kill settles.
    fn restart(&mut self, kind: HookKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Terminate every currently alive invocation across all slots and wait
    /// for the kills to settle. When `include_first_success` is false, the
    /// first-success slot is left untouched.
    fn kill_all(
        &mut self,
        include_first_success: bool,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
