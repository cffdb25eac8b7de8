//! Message processing and side-effect dispatch
//!
//! The update loop: apply a message, run any requested side effect, feed
//! the follow-up message back in. Delayed side effects (the soft-restart
//! flag write, post-maintenance reboots) run on spawned tasks holding
//! their own clone of the parameter store handle; their join handles are
//! tracked in [`PendingEffects`] so shutdown waits for them instead of
//! aborting them with the runtime.

use std::time::Duration;

use opdeck_core::params::keys;
use opdeck_core::{hardware, Params};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::github;
use crate::handler::{self, OutboundSignal, UpdateAction};
use crate::message::Message;
use crate::state::AppState;

/// Delayed writes still in flight.
///
/// Closing the shell must not lose a scheduled write: the flag has to land
/// even when the close signal arrives first. The runner drains this once,
/// after the terminal is restored.
#[derive(Debug, Default)]
pub struct PendingEffects {
    handles: Vec<JoinHandle<()>>,
}

impl PendingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        // Drop already-finished handles so long sessions don't accumulate.
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Number of effects not yet finished.
    pub fn len(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait for every tracked effect to finish.
    pub async fn drain(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!(error = %e, "delayed effect panicked");
                }
            }
        }
    }
}

/// Process one message and everything it cascades into.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    message_tx: &mpsc::Sender<Message>,
    signal_tx: &mpsc::Sender<OutboundSignal>,
    pending: &mut PendingEffects,
) {
    let mut next = Some(message);
    while let Some(message) = next.take() {
        let result = handler::update(state, message);
        if let Some(action) = result.action {
            handle_action(action, state.params.clone(), message_tx, signal_tx, pending);
        }
        next = result.message;
    }
}

/// Execute one side effect. Must run inside a tokio runtime.
pub fn handle_action(
    action: UpdateAction,
    params: Params,
    message_tx: &mpsc::Sender<Message>,
    signal_tx: &mpsc::Sender<OutboundSignal>,
    pending: &mut PendingEffects,
) {
    match action {
        UpdateAction::FetchSshKeys {
            username,
            url,
            timeout_ms,
        } => {
            github::spawn_fetch(message_tx.clone(), username, url, timeout_ms);
        }

        UpdateAction::RunShell { command } => {
            hardware::run_shell(&command);
        }

        UpdateAction::RunShellThenSoftRestart { command, delay_ms } => {
            hardware::run_shell(&command);
            emit_signal(signal_tx, OutboundSignal::CloseSettings);
            pending.track(spawn_soft_restart(params, delay_ms));
        }

        UpdateAction::RunShellThenReboot { command, delay_ms } => {
            hardware::run_shell(&command);
            info!(delay_ms, "rebooting after maintenance command");
            pending.track(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                hardware::reboot();
            }));
        }

        UpdateAction::SoftRestartAndClose { delay_ms } => {
            emit_signal(signal_tx, OutboundSignal::CloseSettings);
            pending.track(spawn_soft_restart(params, delay_ms));
        }

        UpdateAction::Reboot => hardware::reboot(),
        UpdateAction::PowerOff => hardware::poweroff(),

        UpdateAction::EmitSignal(signal) => emit_signal(signal_tx, signal),
    }
}

fn spawn_soft_restart(params: Params, delay_ms: u64) -> JoinHandle<()> {
    info!(delay_ms, "soft restart scheduled");
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        if let Err(e) = params.put_bool(keys::SOFT_RESTART_TRIGGERED, true) {
            error!(error = %e, "failed to write soft restart flag");
        }
    })
}

fn emit_signal(signal_tx: &mpsc::Sender<OutboundSignal>, signal: OutboundSignal) {
    if let Err(e) = signal_tx.try_send(signal) {
        warn!(error = %e, "dropping outbound signal");
    }
}
