// src/engine/mod.rs

//! Orchestration engine for watchtsc.
//!
//! This module ties together:
//! - line classification of the watched compiler's output
//! - the compilation state tracker (did this run error since it started?)
//! - the main runtime event loop that reacts to:
//!   - compiler stdout lines
//!   - inbound manual hook triggers
//!   - compiler exit
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use crate::hooks::HookKind;

/// Events flowing into the runtime from the compiler readers, the IPC
/// channel, and the signal handler.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// One raw line of compiler stdout.
    CompilerLine { line: String },
    /// An external observer asked to re-run a specific hook.
    ManualTrigger { kind: HookKind },
    /// The watched compiler process exited.
    CompilerExited { code: Option<i32> },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Message forwarded to an external observer over the IPC channel.
///
/// Fire-and-forget; emitted in the exact order the triggering
/// classifications were processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventMessage {
    Started,
    FirstSuccess,
    Success,
    CompileErrors,
    FileEmitted(String),
}

impl EventMessage {
    /// Flat string payload as sent on the wire, one message per line.
    pub fn wire_format(&self) -> String {
        match self {
            EventMessage::Started => "started".to_string(),
            EventMessage::FirstSuccess => "first_success".to_string(),
            EventMessage::Success => "success".to_string(),
            EventMessage::CompileErrors => "compile_errors".to_string(),
            EventMessage::FileEmitted(path) => format!("file_emitted:{path}"),
        }
    }
}

pub mod core;
pub mod runtime;

pub use self::core::{CompileCore, CoreCommand, CoreStep};
pub use runtime::Runtime;
