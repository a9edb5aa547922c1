// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [hooks]
/// on_success = "./scripts/reload.sh"
/// on_failure = "notify-send 'tsc failed'"
/// keep_first_success_on_exit = true
///
/// [watch]
/// compiler = "node_modules/.bin/tsc"
/// args = ["-p", "tsconfig.json"]
/// no_clear = true
/// ```
///
/// All sections are optional and have reasonable defaults. CLI flags
/// override file values (see [`super::Settings::resolve`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Hook commands from `[hooks]`.
    #[serde(default)]
    pub hooks: HooksSection,

    /// Compiler and display options from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[hooks]` section: one optional command per lifecycle event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HooksSection {
    pub on_first_success: Option<String>,
    pub on_success: Option<String>,
    pub on_failure: Option<String>,
    pub on_compilation_started: Option<String>,
    pub on_compilation_complete: Option<String>,

    /// Leave the first-success hook alive when watchtsc exits.
    pub keep_first_success_on_exit: Option<bool>,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchSection {
    /// Compiler executable; default `tsc`.
    pub compiler: Option<String>,

    /// Arguments passed through to the compiler.
    #[serde(default)]
    pub args: Vec<String>,

    pub no_colors: Option<bool>,
    pub no_clear: Option<bool>,
    pub silent: Option<bool>,
    pub signal_emitted_files: Option<bool>,

    /// Unix socket path for the event/trigger channel.
    pub ipc: Option<String>,
}
