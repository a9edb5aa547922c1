// src/classify.rs

//! Line classification for tsc watch-mode output.
//!
//! Classification is a pure pattern match against the compiler's known
//! diagnostic phrasing, not a parser of its grammar. Lines that match no
//! pattern yield the all-false classification; interleaved banners and other
//! non-diagnostic output are tolerated by construction. The matching rules
//! live here so they can be extended without touching the state machine or
//! the hook manager.

use std::sync::LazyLock;

use regex::Regex;

/// `tsc --watch` prints one of these when a compilation cycle begins.
static COMPILATION_STARTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Starting compilation in watch mode|File change detected\. Starting incremental compilation",
    )
    .expect("start regex is valid")
});

/// A diagnostic line carrying a TypeScript error code, e.g.
/// `example.ts:10:5 - error TS2322: ...`.
static COMPILATION_ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"error TS\d+:").expect("error regex is valid"));

/// End-of-cycle marker. Older compilers print `Compilation complete.`,
/// newer ones `Found N error(s).`; both end with the watch notice.
static COMPILATION_COMPLETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Found \d+ errors?\. Watching for file changes|Compilation complete\. Watching for file changes",
    )
    .expect("complete regex is valid")
});

/// Emitted-file report printed under `--listEmittedFiles`.
static FILE_EMITTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TSFILE:\s*(.+)").expect("file regex is valid"));

/// What one line of compiler output implies for the state machine.
///
/// The flags are independent boolean checks, not mutually exclusive: a line
/// spanning markers sets every flag it matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// A compilation cycle started on this line.
    pub started: bool,
    /// This line carries an error diagnostic.
    pub errored: bool,
    /// A compilation cycle completed on this line.
    pub completed: bool,
    /// Path of a written output file reported on this line.
    pub file_emitted: Option<String>,
}

impl Classification {
    /// True when the line matched no pattern at all.
    pub fn is_noop(&self) -> bool {
        !self.started && !self.errored && !self.completed && self.file_emitted.is_none()
    }
}

/// Classify one line of compiler output. Pure; no side effects.
///
/// Callers are expected to pass ANSI-stripped text (see
/// [`crate::output::strip_ansi_codes`]) so colored diagnostics match.
pub fn classify(line: &str) -> Classification {
    Classification {
        started: COMPILATION_STARTED.is_match(line),
        errored: COMPILATION_ERROR.is_match(line),
        completed: COMPILATION_COMPLETE.is_match(line),
        file_emitted: FILE_EMITTED
            .captures(line)
            .map(|caps| caps[1].trim().to_string()),
    }
}
