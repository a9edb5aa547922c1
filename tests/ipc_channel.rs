// tests/ipc_channel.rs

//! Round-trip over the Unix-socket IPC channel: trigger tokens in, event
//! messages out, ordering preserved.

#![cfg(unix)]

use std::error::Error;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tokio::sync::mpsc;

use watchtsc::engine::{EventMessage, RuntimeEvent};
use watchtsc::hooks::HookKind;
use watchtsc::ipc;
use watchtsc_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn trigger_tokens_become_manual_trigger_events() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let sock = dir.path().join("watchtsc.sock");
    let listener = UnixListener::bind(&sock)?;

    let (rt_tx, mut rt_rx) = mpsc::channel::<RuntimeEvent>(16);

    let (accepted, broadcaster) =
        tokio::join!(listener.accept(), ipc::connect(&sock, rt_tx));
    let (mut stream, _) = accepted?;
    let _broadcaster = broadcaster?;

    stream
        .write_all(
            b"run-on-success-command\nnot-a-real-token\nrun-on-failure-command\n",
        )
        .await?;

    let first = with_timeout(rt_rx.recv()).await.expect("event");
    assert!(matches!(
        first,
        RuntimeEvent::ManualTrigger {
            kind: HookKind::Success
        }
    ));

    // The bogus token is dropped; the next event is the failure trigger.
    let second = with_timeout(rt_rx.recv()).await.expect("event");
    assert!(matches!(
        second,
        RuntimeEvent::ManualTrigger {
            kind: HookKind::Failure
        }
    ));

    Ok(())
}

#[tokio::test]
async fn emitted_messages_arrive_as_ordered_lines() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let sock = dir.path().join("watchtsc.sock");
    let listener = UnixListener::bind(&sock)?;

    let (rt_tx, _rt_rx) = mpsc::channel::<RuntimeEvent>(16);

    let (accepted, broadcaster) =
        tokio::join!(listener.accept(), ipc::connect(&sock, rt_tx));
    let (stream, _) = accepted?;
    let broadcaster = broadcaster?;

    broadcaster.emit(EventMessage::Started).await;
    broadcaster.emit(EventMessage::FirstSuccess).await;
    broadcaster.emit(EventMessage::Success).await;
    broadcaster
        .emit(EventMessage::FileEmitted("/dist/index.js".to_string()))
        .await;
    broadcaster.emit(EventMessage::CompileErrors).await;

    let mut lines = BufReader::new(stream).lines();
    let expected = [
        "started",
        "first_success",
        "success",
        "file_emitted:/dist/index.js",
        "compile_errors",
    ];
    for want in expected {
        let got = with_timeout(lines.next_line()).await?.expect("line");
        assert_eq!(got, want);
    }

    Ok(())
}

#[tokio::test]
async fn detached_broadcaster_emits_into_the_void() {
    init_tracing();

    // No observer attached: emission is a silent no-op, never an error.
    let broadcaster = ipc::Broadcaster::disabled();
    broadcaster.emit(EventMessage::Started).await;
    broadcaster.emit(EventMessage::Success).await;
}

#[tokio::test]
async fn trigger_tokens_map_to_all_five_kinds() {
    assert_eq!(
        HookKind::from_trigger_token("run-on-first-success-command"),
        Some(HookKind::FirstSuccess)
    );
    assert_eq!(
        HookKind::from_trigger_token("run-on-success-command"),
        Some(HookKind::Success)
    );
    assert_eq!(
        HookKind::from_trigger_token("run-on-failure-command"),
        Some(HookKind::Failure)
    );
    assert_eq!(
        HookKind::from_trigger_token("run-on-compilation-started-command"),
        Some(HookKind::CompilationStarted)
    );
    assert_eq!(
        HookKind::from_trigger_token("run-on-compilation-complete-command"),
        Some(HookKind::CompilationComplete)
    );
    assert_eq!(HookKind::from_trigger_token("something-else"), None);
}
