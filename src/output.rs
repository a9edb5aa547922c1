// src/output.rs

//! Terminal output handling for forwarded compiler lines.
//!
//! `tsc --watch` clears the terminal between compilation cycles and colors
//! its diagnostics. Both behaviors pass through unchanged by default;
//! `--no-clear` and `--no-colors` strip the corresponding escape sequences
//! before the line is printed. Classification always runs on ANSI-stripped
//! text so colored diagnostics classify identically to plain ones.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Settings;

/// ANSI escape sequences: CSI sequences, OSC sequences and simple escapes.
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]              # CSI sequences (colors, cursor)
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\) # OSC sequences
        | \x1b[A-Za-z]                      # simple escapes
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// Terminal clear sequences emitted by tsc between watch cycles:
/// full reset (`ESC c`) and the clear-screen/home trio.
static CLEAR_SEQUENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1bc|\x1b\[2J|\x1b\[3J|\x1b\[H").expect("clear regex is valid"));

/// Strip all ANSI escape sequences from a line.
pub fn strip_ansi_codes(input: &str) -> Cow<'_, str> {
    ANSI_ESCAPE_PATTERN.replace_all(input, "")
}

/// Strip only terminal clear sequences, leaving colors intact.
pub fn strip_clear_sequences(input: &str) -> Cow<'_, str> {
    CLEAR_SEQUENCE_PATTERN.replace_all(input, "")
}

/// Forwards compiler stdout lines to our stdout, applying the configured
/// display transformations.
#[derive(Debug, Clone, Copy)]
pub struct Display {
    no_colors: bool,
    no_clear: bool,
    silent: bool,
}

impl Display {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            no_colors: settings.no_colors,
            no_clear: settings.no_clear,
            silent: settings.silent,
        }
    }

    /// Print one compiler line, transformed per settings. No-op when silent.
    pub fn forward_line(&self, raw: &str) {
        if self.silent {
            return;
        }

        let mut line = Cow::Borrowed(raw);
        if self.no_clear {
            line = Cow::Owned(strip_clear_sequences(&line).into_owned());
        }
        if self.no_colors {
            line = Cow::Owned(strip_ansi_codes(&line).into_owned());
        }

        println!("{line}");
    }
}
