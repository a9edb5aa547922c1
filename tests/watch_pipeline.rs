// tests/watch_pipeline.rs

//! End-to-end run: a fake compiler script plays one watch cycle, the
//! success hook fires, and the compiler's exit code is propagated.

#![cfg(unix)]

use std::error::Error;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use clap::Parser;

use watchtsc::cli::CliArgs;
use watchtsc::errors::WatchtscError;
use watchtsc_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

/// Write an executable script that ignores its arguments (watchtsc appends
/// `--watch`) and plays back canned compiler output.
fn fake_compiler(dir: &Path, body: &str) -> Result<std::path::PathBuf, Box<dyn Error>> {
    let path = dir.join("fake-tsc");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "#!/bin/sh")?;
    file.write_all(body.as_bytes())?;
    drop(file);

    let mut perms = std::fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms)?;
    Ok(path)
}

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["watchtsc"];
    full.extend_from_slice(argv);
    CliArgs::parse_from(full)
}

#[tokio::test]
async fn successful_cycle_runs_the_success_hooks() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("hooks.log");
    let compiler = fake_compiler(
        dir.path(),
        r#"
echo "Starting compilation in watch mode..."
echo "Found 0 errors. Watching for file changes."
sleep 0.5
exit 0
"#,
    )?;

    let code = with_timeout(watchtsc::run(args(&[
        "--silent",
        "--compiler",
        compiler.to_str().unwrap(),
        "--on-success",
        &format!("echo success >> {}", out.display()),
        "--on-first-success",
        &format!("echo first >> {}", out.display()),
        "--on-failure",
        &format!("echo failure >> {}", out.display()),
    ])))
    .await?;

    assert_eq!(code, 0);

    let log = std::fs::read_to_string(&out)?;
    let mut lines: Vec<&str> = log.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["first", "success"]);

    Ok(())
}

#[tokio::test]
async fn failing_cycle_runs_the_failure_hook_and_keeps_the_exit_code() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("hooks.log");
    let compiler = fake_compiler(
        dir.path(),
        r#"
echo "File change detected. Starting incremental compilation..."
echo "src/a.ts:1:1 - error TS2322: Type mismatch."
echo "Found 1 error. Watching for file changes."
sleep 0.5
exit 2
"#,
    )?;

    let code = with_timeout(watchtsc::run(args(&[
        "--silent",
        "--compiler",
        compiler.to_str().unwrap(),
        "--on-success",
        &format!("echo success >> {}", out.display()),
        "--on-failure",
        &format!("echo failure >> {}", out.display()),
    ])))
    .await?;

    assert_eq!(code, 2);

    let log = std::fs::read_to_string(&out)?;
    assert_eq!(log.lines().collect::<Vec<_>>(), vec!["failure"]);

    Ok(())
}

#[tokio::test]
async fn missing_compiler_is_a_fatal_startup_error() {
    init_tracing();

    let err = watchtsc::run(args(&[
        "--silent",
        "--compiler",
        "/definitely/not/a/real/tsc",
    ]))
    .await
    .unwrap_err();

    assert!(matches!(err, WatchtscError::CompilerNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}
