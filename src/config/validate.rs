// src/config/validate.rs

use crate::config::model::ConfigFile;
use crate::errors::{Result, WatchtscError};

/// Basic semantic validation of a loaded config file.
///
/// Catches values that would otherwise fail much later and less clearly:
/// hook commands that are empty or whitespace-only, and an empty compiler
/// path.
pub fn validate_config(config: &ConfigFile) -> Result<()> {
    let hook_fields = [
        ("on_first_success", &config.hooks.on_first_success),
        ("on_success", &config.hooks.on_success),
        ("on_failure", &config.hooks.on_failure),
        ("on_compilation_started", &config.hooks.on_compilation_started),
        (
            "on_compilation_complete",
            &config.hooks.on_compilation_complete,
        ),
    ];

    for (name, command) in hook_fields {
        if let Some(command) = command {
            if command.trim().is_empty() {
                return Err(WatchtscError::ConfigError(format!(
                    "hook command '{name}' is empty"
                )));
            }
        }
    }

    if let Some(compiler) = &config.watch.compiler {
        if compiler.trim().is_empty() {
            return Err(WatchtscError::ConfigError(
                "watch.compiler is empty".to_string(),
            ));
        }
    }

    Ok(())
}
