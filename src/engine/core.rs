// src/engine/core.rs

//! Pure core state machine.
//!
//! This module contains a synchronous, deterministic core that consumes
//! [`RuntimeEvent`]s and produces a list of "commands" describing what the
//! IO shell should do next (emit a message, restart a hook, exit).
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - forwarding compiler output to the terminal
//! - dispatching restarts to the hook backend
//! - emitting messages on the IPC channel
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, or processes.

use crate::classify::{classify, Classification};
use crate::engine::{EventMessage, RuntimeEvent};
use crate::hooks::HookKind;
use crate::output::strip_ansi_codes;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Send this message to the external observer.
    Emit(EventMessage),
    /// Kill-then-restart the hook for this kind.
    RestartHook(HookKind),
    /// Shut down and exit the process with this code.
    Exit { code: i32 },
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn running(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Compilation state tracker.
///
/// One compilation run spans from a start marker to the next complete
/// marker. `error_since_start` is reset on start, sticky on any error line,
/// and read at complete to decide success vs failure. A complete with no
/// preceding start in the current run is processed with whatever the flag
/// currently holds; the compiler's first cycle may begin mid-stream.
#[derive(Debug, Default)]
pub struct CompileCore {
    error_since_start: bool,
    first_success_fired: bool,
}

impl CompileCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::CompilerLine { line } => {
                let classification = classify(&strip_ansi_codes(&line));
                self.handle_classification(&classification)
            }
            RuntimeEvent::ManualTrigger { kind } => {
                CoreStep::running(vec![CoreCommand::RestartHook(kind)])
            }
            RuntimeEvent::CompilerExited { code } => CoreStep {
                commands: vec![CoreCommand::Exit {
                    code: code.unwrap_or(1),
                }],
                keep_running: false,
            },
            RuntimeEvent::ShutdownRequested => CoreStep {
                commands: vec![CoreCommand::Exit { code: 0 }],
                keep_running: false,
            },
        }
    }

    fn handle_classification(&mut self, classification: &Classification) -> CoreStep {
        let mut commands = Vec::new();

        if classification.started {
            commands.push(CoreCommand::Emit(EventMessage::Started));
            commands.push(CoreCommand::RestartHook(HookKind::CompilationStarted));
            // If the start line itself carries an error marker, carry it
            // into the new run.
            self.error_since_start = classification.errored;
        } else if classification.errored {
            self.error_since_start = true;
        }

        if classification.completed {
            commands.push(CoreCommand::RestartHook(HookKind::CompilationComplete));

            if self.error_since_start {
                commands.push(CoreCommand::Emit(EventMessage::CompileErrors));
                commands.push(CoreCommand::RestartHook(HookKind::Failure));
            } else {
                if !self.first_success_fired {
                    self.first_success_fired = true;
                    commands.push(CoreCommand::Emit(EventMessage::FirstSuccess));
                    commands.push(CoreCommand::RestartHook(HookKind::FirstSuccess));
                }
                commands.push(CoreCommand::Emit(EventMessage::Success));
                commands.push(CoreCommand::RestartHook(HookKind::Success));
            }
        }

        if let Some(path) = &classification.file_emitted {
            commands.push(CoreCommand::Emit(EventMessage::FileEmitted(path.clone())));
        }

        CoreStep::running(commands)
    }

    /// Expose the sticky error flag (for tests).
    pub fn error_since_start(&self) -> bool {
        self.error_since_start
    }

    /// Expose the one-shot first-success guard (for tests).
    pub fn first_success_fired(&self) -> bool {
        self.first_success_fired
    }
}
