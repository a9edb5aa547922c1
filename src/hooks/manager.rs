// src/hooks/manager.rs

//! Production hook backend.
//!
//! The manager holds one request channel per configured hook kind and
//! forwards restart/kill requests to the slot actors in [`super::slot`].

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::hooks::slot::{spawn_slot, SlotRequest};
use crate::hooks::{HookBackend, HookCommands, HookKind};

/// Real hook backend used in production.
///
/// Construction spawns one slot actor per configured kind; kinds with no
/// command configured get no slot and every request for them is a no-op.
pub struct HookManager {
    slots: HashMap<HookKind, tokio::sync::mpsc::Sender<SlotRequest>>,
}

impl HookManager {
    pub fn new(hooks: &HookCommands) -> Self {
        let mut slots = HashMap::new();
        for (kind, command) in hooks.iter_configured() {
            slots.insert(kind, spawn_slot(kind, command.to_string()));
        }
        Self { slots }
    }
}

impl HookBackend for HookManager {
    fn restart(&mut self, kind: HookKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let slot = self.slots.get(&kind).cloned();

        Box::pin(async move {
            let Some(slot) = slot else {
                debug!(hook = kind.as_str(), "no command configured; restart is a no-op");
                return Ok(());
            };

            // Enqueue only; the slot actor performs kill+spawn on its own
            // task so the event loop is not held up by a slow kill.
            if slot.send(SlotRequest::Restart).await.is_err() {
                warn!(hook = kind.as_str(), "hook slot gone; dropping restart request");
            }
            Ok(())
        })
    }

    fn kill_all(
        &mut self,
        include_first_success: bool,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let slots: Vec<(HookKind, tokio::sync::mpsc::Sender<SlotRequest>)> = self
            .slots
            .iter()
            .filter(|(kind, _)| include_first_success || **kind != HookKind::FirstSuccess)
            .map(|(kind, tx)| (*kind, tx.clone()))
            .collect();

        Box::pin(async move {
            // Fan out the kill requests first, then await all acks, so slow
            // kills on different slots settle in parallel.
            let mut acks: Vec<(HookKind, oneshot::Receiver<()>)> = Vec::new();
            for (kind, slot) in slots {
                let (done_tx, done_rx) = oneshot::channel();
                if slot.send(SlotRequest::Kill { done: done_tx }).await.is_err() {
                    debug!(hook = kind.as_str(), "hook slot already gone during kill_all");
                    continue;
                }
                acks.push((kind, done_rx));
            }

            for (kind, done_rx) in acks {
                if done_rx.await.is_err() {
                    debug!(hook = kind.as_str(), "hook slot dropped kill ack");
                }
            }

            Ok(())
        })
    }
}
