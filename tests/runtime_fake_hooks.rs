// tests/runtime_fake_hooks.rs

//! Runtime shell tests with a fake hook backend: event order, hook restart
//! order, and shutdown-time kill behavior, without spawning any processes.

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use watchtsc::config::Settings;
use watchtsc::engine::{CompileCore, EventMessage, Runtime, RuntimeEvent};
use watchtsc::hooks::HookKind;
use watchtsc::ipc::Broadcaster;
use watchtsc::output::Display;

use watchtsc_test_utils::fake_hooks::{FakeHookBackend, HookCall};
use watchtsc_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn silent_display() -> Display {
    let settings = Settings {
        silent: true,
        ..Settings::default()
    };
    Display::from_settings(&settings)
}

struct Harness {
    rt_tx: mpsc::Sender<RuntimeEvent>,
    msg_rx: mpsc::Receiver<EventMessage>,
    calls: Arc<Mutex<Vec<HookCall>>>,
    runtime: Runtime<FakeHookBackend>,
}

fn harness(kill_first_success_on_exit: bool) -> Harness {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let (msg_tx, msg_rx) = mpsc::channel::<EventMessage>(64);

    let calls = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeHookBackend::new(Arc::clone(&calls));

    let runtime = Runtime::new(
        CompileCore::new(),
        rt_rx,
        backend,
        Broadcaster::attached(msg_tx),
        silent_display(),
        kill_first_success_on_exit,
    );

    Harness {
        rt_tx,
        msg_rx,
        calls,
        runtime,
    }
}

async fn send_line(tx: &mpsc::Sender<RuntimeEvent>, line: &str) {
    tx.send(RuntimeEvent::CompilerLine {
        line: line.to_string(),
    })
    .await
    .expect("runtime alive");
}

fn drain(rx: &mut mpsc::Receiver<EventMessage>) -> Vec<EventMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

#[tokio::test]
async fn event_order_matches_source_line_order() -> TestResult {
    init_tracing();

    let mut h = harness(true);

    send_line(&h.rt_tx, "Found 0 errors. Watching for file changes.").await;
    send_line(
        &h.rt_tx,
        "File change detected. Starting incremental compilation...",
    )
    .await;
    send_line(&h.rt_tx, "example.ts:10:5 - error TS2322: nope").await;
    send_line(&h.rt_tx, "Found 1 error. Watching for file changes.").await;
    h.rt_tx.send(RuntimeEvent::ShutdownRequested).await?;

    let code = with_timeout(h.runtime.run()).await?;
    assert_eq!(code, 0);

    assert_eq!(
        drain(&mut h.msg_rx),
        vec![
            EventMessage::FirstSuccess,
            EventMessage::Success,
            EventMessage::Started,
            EventMessage::CompileErrors,
        ]
    );

    let calls = h.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            HookCall::Restart(HookKind::CompilationComplete),
            HookCall::Restart(HookKind::FirstSuccess),
            HookCall::Restart(HookKind::Success),
            HookCall::Restart(HookKind::CompilationStarted),
            HookCall::Restart(HookKind::CompilationComplete),
            HookCall::Restart(HookKind::Failure),
            HookCall::KillAll {
                include_first_success: true
            },
        ]
    );

    Ok(())
}

#[tokio::test]
async fn manual_trigger_restarts_like_an_automatic_one() -> TestResult {
    init_tracing();

    let mut h = harness(true);

    h.rt_tx
        .send(RuntimeEvent::ManualTrigger {
            kind: HookKind::Success,
        })
        .await?;
    send_line(&h.rt_tx, "Found 0 errors. Watching for file changes.").await;
    h.rt_tx.send(RuntimeEvent::ShutdownRequested).await?;

    with_timeout(h.runtime.run()).await?;

    let calls = h.calls.lock().unwrap().clone();
    // The manual trigger and the automatic success trigger produce the same
    // restart call, in arrival order.
    assert_eq!(calls[0], HookCall::Restart(HookKind::Success));
    assert!(calls.contains(&HookCall::Restart(HookKind::FirstSuccess)));
    assert_eq!(
        calls.iter().filter(|c| **c == HookCall::Restart(HookKind::Success)).count(),
        2
    );

    // No observer-visible event for manual triggers themselves.
    let events = drain(&mut h.msg_rx);
    assert_eq!(
        events,
        vec![EventMessage::FirstSuccess, EventMessage::Success]
    );

    Ok(())
}

#[tokio::test]
async fn compiler_exit_code_is_propagated() -> TestResult {
    init_tracing();

    let h = harness(true);
    h.rt_tx
        .send(RuntimeEvent::CompilerExited { code: Some(2) })
        .await?;

    let code = with_timeout(h.runtime.run()).await?;
    assert_eq!(code, 2);

    let calls = h.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![HookCall::KillAll {
            include_first_success: true
        }]
    );

    Ok(())
}

#[tokio::test]
async fn shutdown_can_spare_the_first_success_hook() -> TestResult {
    init_tracing();

    let h = harness(false);
    h.rt_tx.send(RuntimeEvent::ShutdownRequested).await?;

    with_timeout(h.runtime.run()).await?;

    let calls = h.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![HookCall::KillAll {
            include_first_success: false
        }]
    );

    Ok(())
}
