//! Message handlers
//!
//! `update()` is the single entry point: it takes the current state and one
//! message, mutates the state, and returns an optional follow-up message
//! plus an optional side effect for the dispatcher. Handlers never perform
//! I/O beyond the parameter store; shell commands, timers, and network
//! fetches are described as [`UpdateAction`]s and executed elsewhere.

mod controls;
mod keys;
mod software;
mod ssh;
mod update;


pub use update::update;

use crate::message::Message;

/// Signal emitted to the embedding host. The console does not interpret
/// these beyond logging; the host owns screen transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundSignal {
    /// Close the settings shell.
    CloseSettings,
    /// Show the driver-facing camera preview.
    ShowDriverCamera,
    /// Re-run the onboarding training guide.
    ReviewTrainingGuide,
    /// The selected car changed; the host may want to re-fingerprint.
    SelectedCarChanged,
}

/// Side effect requested by a handler, executed by the dispatcher.
///
/// Each variant is self-contained: the delayed flag writes run on detached
/// tasks that outlive the settings shell.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Fetch `/<username>.keys` and report the outcome as a message.
    FetchSshKeys {
        username: String,
        url: String,
        timeout_ms: u64,
    },
    /// Run a shell command, fire-and-forget.
    RunShell { command: String },
    /// Run a shell command, close the shell, then write the soft-restart
    /// flag after `delay_ms`.
    RunShellThenSoftRestart { command: String, delay_ms: u64 },
    /// Run a shell command, then reboot after `delay_ms`.
    RunShellThenReboot { command: String, delay_ms: u64 },
    /// Close the shell, then write the soft-restart flag after `delay_ms`.
    SoftRestartAndClose { delay_ms: u64 },
    Reboot,
    PowerOff,
    EmitSignal(OutboundSignal),
}

/// Result of a message update.
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Follow-up message processed in the same loop iteration.
    pub message: Option<Message>,
    /// Side effect for the dispatcher.
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(message: Message) -> Self {
        Self {
            message: Some(message),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
