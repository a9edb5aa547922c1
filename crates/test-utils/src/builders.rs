#![allow(dead_code)]

use watchtsc::config::Settings;
use watchtsc::hooks::{HookCommands, HookKind};

/// Builder for `HookCommands` to simplify test setup.
#[derive(Default)]
pub struct HookCommandsBuilder {
    hooks: HookCommands,
}

impl HookCommandsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: HookKind, command: &str) -> Self {
        let slot = match kind {
            HookKind::FirstSuccess => &mut self.hooks.first_success,
            HookKind::Success => &mut self.hooks.success,
            HookKind::Failure => &mut self.hooks.failure,
            HookKind::CompilationStarted => &mut self.hooks.compilation_started,
            HookKind::CompilationComplete => &mut self.hooks.compilation_complete,
        };
        *slot = Some(command.to_string());
        self
    }

    pub fn build(self) -> HookCommands {
        self.hooks
    }
}

/// Builder for `Settings` with test-friendly defaults (silent, no hooks,
/// `tsc` compiler).
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings {
                compiler: "tsc".to_string(),
                silent: true,
                ..Settings::default()
            },
        }
    }

    pub fn compiler(mut self, compiler: &str) -> Self {
        self.settings.compiler = compiler.to_string();
        self
    }

    pub fn compiler_args(mut self, args: &[&str]) -> Self {
        self.settings.compiler_args = args.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn hooks(mut self, hooks: HookCommands) -> Self {
        self.settings.hooks = hooks;
        self
    }

    pub fn keep_first_success_on_exit(mut self, val: bool) -> Self {
        self.settings.keep_first_success_on_exit = val;
        self
    }

    pub fn signal_emitted_files(mut self, val: bool) -> Self {
        self.settings.signal_emitted_files = val;
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
