use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use watchtsc::errors::Result;
use watchtsc::hooks::{HookBackend, HookKind};

/// What the fake backend observed, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall {
    Restart(HookKind),
    KillAll { include_first_success: bool },
}

/// A fake hook backend that records restarts and kills instead of spawning
/// real processes.
pub struct FakeHookBackend {
    calls: Arc<Mutex<Vec<HookCall>>>,
}

impl FakeHookBackend {
    pub fn new(calls: Arc<Mutex<Vec<HookCall>>>) -> Self {
        Self { calls }
    }
}

impl HookBackend for FakeHookBackend {
    fn restart(&mut self, kind: HookKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let calls = Arc::clone(&self.calls);
        Box::pin(async move {
            calls.lock().unwrap().push(HookCall::Restart(kind));
            Ok(())
        })
    }

    fn kill_all(
        &mut self,
        include_first_success: bool,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let calls = Arc::clone(&self.calls);
        Box::pin(async move {
            calls.lock().unwrap().push(HookCall::KillAll {
                include_first_success,
            });
            Ok(())
        })
    }
}
