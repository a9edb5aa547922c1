// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchtsc`.
///
/// Any arguments after the known flags are passed through to the compiler
/// unchanged, e.g. `watchtsc --on-success "echo ok" -- -p tsconfig.json`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchtsc",
    version,
    about = "Watch tsc output and run commands on compilation lifecycle events.",
    long_about = None
)]
pub struct CliArgs {
    /// Command to run on the first successful compilation (at most once per
    /// process lifetime).
    #[arg(long, value_name = "COMMAND")]
    pub on_first_success: Option<String>,

    /// Command to run on every successful compilation.
    #[arg(long, value_name = "COMMAND")]
    pub on_success: Option<String>,

    /// Command to run when a compilation finishes with errors.
    #[arg(long, value_name = "COMMAND")]
    pub on_failure: Option<String>,

    /// Command to run when a compilation cycle starts.
    #[arg(long, value_name = "COMMAND")]
    pub on_compilation_started: Option<String>,

    /// Command to run when a compilation cycle finishes (success or failure).
    #[arg(long, value_name = "COMMAND")]
    pub on_compilation_complete: Option<String>,

    /// Leave the first-success hook process alive when watchtsc exits.
    #[arg(long)]
    pub keep_first_success_on_exit: bool,

    /// Compiler executable to spawn (default: `tsc`).
    #[arg(long, value_name = "PATH")]
    pub compiler: Option<String>,

    /// Strip ANSI color codes from forwarded compiler output.
    #[arg(long)]
    pub no_colors: bool,

    /// Strip terminal clear sequences from forwarded compiler output.
    #[arg(long)]
    pub no_clear: bool,

    /// Do not forward compiler output to stdout at all.
    #[arg(long)]
    pub silent: bool,

    /// Pass `--listEmittedFiles` to the compiler and emit a `file_emitted`
    /// event per written file.
    #[arg(long)]
    pub signal_emitted_files: bool,

    /// Unix socket path for the event/trigger channel to a parent process.
    #[arg(long, value_name = "PATH")]
    pub ipc: Option<PathBuf>,

    /// Path to an optional config file (TOML).
    ///
    /// If omitted, `Watchtsc.toml` in the current working directory is used
    /// when present; a missing default file is not an error.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHTSC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Arguments passed through to the compiler.
    #[arg(trailing_var_arg = true, value_name = "COMPILER_ARGS")]
    pub compiler_args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
