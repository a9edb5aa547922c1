// src/config/mod.rs

//! Configuration loading and CLI/file merging.
//!
//! The configuration surface is small: five optional hook commands, the
//! compiler identity, display flags, and the IPC socket path. Values can
//! come from an optional `Watchtsc.toml` and from CLI flags; flags win.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_optional};
pub use model::{ConfigFile, HooksSection, WatchSection};
pub use validate::validate_config;

use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::errors::Result;
use crate::hooks::HookCommands;

/// Fully resolved settings consumed by the rest of the crate.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub compiler: String,
    pub compiler_args: Vec<String>,
    pub hooks: HookCommands,
    pub keep_first_success_on_exit: bool,
    pub no_colors: bool,
    pub no_clear: bool,
    pub silent: bool,
    pub signal_emitted_files: bool,
    pub ipc_path: Option<PathBuf>,
}

impl Settings {
    /// Merge CLI arguments over a loaded config file.
    pub fn resolve(args: &CliArgs, file: ConfigFile) -> Settings {
        let hooks = HookCommands {
            first_success: args
                .on_first_success
                .clone()
                .or(file.hooks.on_first_success),
            success: args.on_success.clone().or(file.hooks.on_success),
            failure: args.on_failure.clone().or(file.hooks.on_failure),
            compilation_started: args
                .on_compilation_started
                .clone()
                .or(file.hooks.on_compilation_started),
            compilation_complete: args
                .on_compilation_complete
                .clone()
                .or(file.hooks.on_compilation_complete),
        };

        let compiler_args = if args.compiler_args.is_empty() {
            file.watch.args
        } else {
            args.compiler_args.clone()
        };

        Settings {
            compiler: args
                .compiler
                .clone()
                .or(file.watch.compiler)
                .unwrap_or_else(|| "tsc".to_string()),
            compiler_args,
            hooks,
            keep_first_success_on_exit: args.keep_first_success_on_exit
                || file.hooks.keep_first_success_on_exit.unwrap_or(false),
            no_colors: args.no_colors || file.watch.no_colors.unwrap_or(false),
            no_clear: args.no_clear || file.watch.no_clear.unwrap_or(false),
            silent: args.silent || file.watch.silent.unwrap_or(false),
            signal_emitted_files: args.signal_emitted_files
                || file.watch.signal_emitted_files.unwrap_or(false),
            ipc_path: args
                .ipc
                .clone()
                .or_else(|| file.watch.ipc.map(PathBuf::from)),
        }
    }

    /// Arguments actually passed to the compiler: the user's passthrough
    /// args, plus `--watch` when absent, plus `--listEmittedFiles` when
    /// emitted-file signalling is on.
    pub fn effective_compiler_args(&self) -> Vec<String> {
        let mut args = self.compiler_args.clone();

        let has_watch = args.iter().any(|a| a == "--watch" || a == "-w");
        if !has_watch {
            args.push("--watch".to_string());
        }

        if self.signal_emitted_files && !args.iter().any(|a| a == "--listEmittedFiles") {
            args.push("--listEmittedFiles".to_string());
        }

        args
    }
}

/// Load the optional config file and merge the CLI over it.
pub fn resolve_settings(args: &CliArgs) -> Result<Settings> {
    let file = loader::load_optional(args.config.as_deref())?;
    Ok(Settings::resolve(args, file))
}
